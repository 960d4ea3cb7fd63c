//! Backend commands queued from UI to backend worker.

use shared::{
    domain::{RideId, RideTransition, UserId},
    protocol::{DriverStatusUpdate, NewUser, RideRequest},
};

/// Issue order of a command. Later requests carry larger values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestSeq(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    CreateUser {
        seq: RequestSeq,
        user: NewUser,
    },
    RefreshDrivers {
        seq: RequestSeq,
    },
    UpdateDriverStatus {
        seq: RequestSeq,
        update: DriverStatusUpdate,
    },
    RequestRide {
        seq: RequestSeq,
        request: RideRequest,
    },
    AssignDriver {
        seq: RequestSeq,
        ride_id: RideId,
        driver_id: UserId,
    },
    UpdateRideStatus {
        seq: RequestSeq,
        ride_id: RideId,
        status: RideTransition,
    },
    LoadRides {
        seq: RequestSeq,
        rider_id: Option<UserId>,
    },
}

impl BackendCommand {
    pub fn seq(&self) -> RequestSeq {
        match self {
            Self::CreateUser { seq, .. }
            | Self::RefreshDrivers { seq }
            | Self::UpdateDriverStatus { seq, .. }
            | Self::RequestRide { seq, .. }
            | Self::AssignDriver { seq, .. }
            | Self::UpdateRideStatus { seq, .. }
            | Self::LoadRides { seq, .. } => *seq,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateUser { .. } => "create_user",
            Self::RefreshDrivers { .. } => "refresh_drivers",
            Self::UpdateDriverStatus { .. } => "update_driver_status",
            Self::RequestRide { .. } => "request_ride",
            Self::AssignDriver { .. } => "assign_driver",
            Self::UpdateRideStatus { .. } => "update_ride_status",
            Self::LoadRides { .. } => "load_rides",
        }
    }
}
