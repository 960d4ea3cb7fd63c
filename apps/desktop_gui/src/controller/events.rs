//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ClientError;
use shared::{
    domain::{RideId, RideTransition, Role, UserId},
    protocol::{DriverSummary, RideSummary},
};

use crate::backend_bridge::commands::RequestSeq;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Error(UiError),
    UserCreated {
        seq: RequestSeq,
        role: Role,
        result: Result<UserId, UiError>,
    },
    DriversLoaded {
        seq: RequestSeq,
        result: Result<Vec<DriverSummary>, UiError>,
    },
    DriverStatusUpdated {
        seq: RequestSeq,
        result: Result<(), UiError>,
    },
    RideRequested {
        seq: RequestSeq,
        result: Result<RideId, UiError>,
    },
    DriverAssigned {
        seq: RequestSeq,
        result: Result<(), UiError>,
    },
    RideStatusUpdated {
        seq: RequestSeq,
        status: RideTransition,
        result: Result<(), UiError>,
    },
    RidesLoaded {
        seq: RequestSeq,
        result: Result<Vec<RideSummary>, UiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Status,
    Decode,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CreateUser,
    RefreshDrivers,
    UpdateDriverStatus,
    RequestRide,
    AssignDriver,
    UpdateRideStatus,
    LoadRides,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport { .. } => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Status,
            ClientError::Decode { .. } => UiErrorCategory::Decode,
            ClientError::InvalidBaseUrl { .. } | ClientError::HttpClient(_) => {
                UiErrorCategory::Configuration
            }
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(
        context: UiErrorContext,
        category: UiErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text shown to the user. Request failures use one fixed line per
    /// operation; the detailed message only goes to the log.
    pub fn status_message(&self) -> String {
        let fixed = match self.context {
            UiErrorContext::BackendStartup => {
                return format!("Backend worker startup failure: {}", self.message)
            }
            UiErrorContext::CreateUser => "Failed to create user",
            UiErrorContext::RefreshDrivers => "Failed to load drivers",
            UiErrorContext::UpdateDriverStatus => "Failed to update status",
            UiErrorContext::RequestRide => "Failed to request ride",
            UiErrorContext::AssignDriver => "Assign failed",
            UiErrorContext::UpdateRideStatus => "Update status failed",
            UiErrorContext::LoadRides => "Failed to load rides",
        };
        fixed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_map_to_fixed_status_lines() {
        let err = UiError::from_message(
            UiErrorContext::AssignDriver,
            UiErrorCategory::Status,
            "assign_driver returned HTTP 409 Conflict",
        );
        assert_eq!(err.status_message(), "Assign failed");
        assert_eq!(err.category(), UiErrorCategory::Status);
    }

    #[test]
    fn startup_failures_keep_their_detail() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            UiErrorCategory::Configuration,
            "invalid backend url 'nope'",
        );
        assert_eq!(
            err.status_message(),
            "Backend worker startup failure: invalid backend url 'nope'"
        );
    }
}
