use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(RideId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Rider,
    Driver,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rider => "rider",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ride status as reported by the backend.
///
/// The backend owns the ride state machine, so statuses this client does not
/// know about are kept verbatim in [`RideStatus::Other`] instead of failing
/// the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RideStatus {
    Requested,
    PickedUp,
    Completed,
    Cancelled,
    Other(String),
}

impl RideStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Requested => "requested",
            Self::PickedUp => "picked_up",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

/// An unreported status, shown as an empty cell.
impl Default for RideStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for RideStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "requested" => Self::Requested,
            "picked_up" => Self::PickedUp,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<RideStatus> for String {
    fn from(value: RideStatus) -> Self {
        match value {
            RideStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status change the client is allowed to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideTransition {
    PickedUp,
    Completed,
    Cancelled,
}

impl RideTransition {
    pub const ALL: [RideTransition; 3] = [Self::PickedUp, Self::Completed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PickedUp => "picked_up",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            Self::PickedUp => "Pick up",
            Self::Completed => "Complete",
            Self::Cancelled => "Cancel",
        }
    }
}

impl fmt::Display for RideTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RideTransition> for RideStatus {
    fn from(value: RideTransition) -> Self {
        match value {
            RideTransition::PickedUp => Self::PickedUp,
            RideTransition::Completed => Self::Completed,
            RideTransition::Cancelled => Self::Cancelled,
        }
    }
}
