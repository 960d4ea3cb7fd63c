use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Backend operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    ListDrivers,
    UpdateDriverStatus,
    RequestRide,
    AssignDriver,
    UpdateRideStatus,
    ListRides,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::ListDrivers => "list_drivers",
            Self::UpdateDriverStatus => "update_driver_status",
            Self::RequestRide => "request_ride",
            Self::AssignDriver => "assign_driver",
            Self::UpdateRideStatus => "update_ride_status",
            Self::ListRides => "list_rides",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status}")]
    Status {
        operation: Operation,
        status: StatusCode,
    },
    #[error("{operation} returned an unreadable body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidBaseUrl { .. } | Self::HttpClient(_) => None,
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
        }
    }
}
