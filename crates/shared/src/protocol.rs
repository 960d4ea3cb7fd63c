use serde::{Deserialize, Serialize};

use crate::domain::{RideId, RideStatus, RideTransition, Role, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_active: bool,
}

impl NewUser {
    pub fn active(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            phone: None,
            is_active: true,
        }
    }
}

/// Body returned by the create endpoints. Only the id is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: String,
}

/// Full driver status pushed on every update. Blank coordinates travel as
/// JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStatusUpdate {
    pub user_id: UserId,
    pub is_available: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl DriverStatusUpdate {
    /// Builds an update from raw form text. Coordinates that are blank or not
    /// a finite number become `None` and are sent as `null`.
    pub fn from_form(user_id: UserId, is_available: bool, lat: &str, lng: &str) -> Self {
        Self {
            user_id,
            is_available,
            lat: parse_coordinate(lat),
            lng: parse_coordinate(lng),
        }
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverStatus {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl DriverStatus {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub status: Option<DriverStatus>,
}

impl DriverSummary {
    pub fn is_available(&self) -> bool {
        self.status
            .as_ref()
            .map(|status| status.is_available)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideRequest {
    pub rider_id: UserId,
    pub pickup: String,
    pub dropoff: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideStatusChange {
    pub status: RideTransition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideSummary {
    pub id: RideId,
    #[serde(default)]
    pub rider_id: Option<UserId>,
    #[serde(default)]
    pub pickup: String,
    #[serde(default)]
    pub dropoff: String,
    #[serde(default)]
    pub status: RideStatus,
    #[serde(default)]
    pub driver_id: Option<UserId>,
}
