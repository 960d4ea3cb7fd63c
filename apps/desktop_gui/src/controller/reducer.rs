//! Single update path for the view state.
//!
//! `begin` turns a user action into at most one backend command. `apply`
//! folds a settled response back in and returns the follow-up actions that
//! response triggers, e.g. a ride list reload after a successful assignment.

use shared::{
    domain::{RideId, RideTransition, Role, UserId},
    protocol::{DriverStatusUpdate, NewUser, RideRequest},
};

use crate::backend_bridge::commands::{BackendCommand, RequestSeq};
use crate::controller::events::UiEvent;
use crate::controller::state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    CreateUser(Role),
    RefreshDrivers,
    UpdateDriverStatus,
    RequestRide,
    AssignDriver {
        ride_id: RideId,
        driver_id: UserId,
    },
    UpdateRideStatus {
        ride_id: RideId,
        status: RideTransition,
    },
    LoadRides,
}

/// Client-side guard that stopped an action before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    MissingDriver,
    MissingRider,
}

impl Precondition {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingDriver => "Create a driver first",
            Self::MissingRider => "Create a rider first",
        }
    }
}

impl ViewState {
    pub fn begin(&mut self, action: UiAction) -> Option<BackendCommand> {
        match self.prepare(action) {
            Ok(cmd) => {
                if let BackendCommand::RefreshDrivers { seq } = &cmd {
                    self.driver_refreshes.insert(*seq);
                }
                Some(cmd)
            }
            Err(precondition) => {
                let seq = self.next_seq();
                self.set_status(seq, precondition.message());
                None
            }
        }
    }

    fn prepare(&mut self, action: UiAction) -> Result<BackendCommand, Precondition> {
        let cmd = match action {
            UiAction::CreateUser(role) => {
                let name = match role {
                    Role::Rider => self.rider_name.clone(),
                    Role::Driver => self.driver_name.clone(),
                };
                BackendCommand::CreateUser {
                    seq: self.next_seq(),
                    user: NewUser::active(name, role),
                }
            }
            UiAction::RefreshDrivers => BackendCommand::RefreshDrivers {
                seq: self.next_seq(),
            },
            UiAction::UpdateDriverStatus => {
                let driver_id = self.driver_id.clone().ok_or(Precondition::MissingDriver)?;
                let update = DriverStatusUpdate::from_form(
                    driver_id,
                    self.driver_available,
                    &self.driver_lat,
                    &self.driver_lng,
                );
                BackendCommand::UpdateDriverStatus {
                    seq: self.next_seq(),
                    update,
                }
            }
            UiAction::RequestRide => {
                let rider_id = self.rider_id.clone().ok_or(Precondition::MissingRider)?;
                BackendCommand::RequestRide {
                    seq: self.next_seq(),
                    request: RideRequest {
                        rider_id,
                        pickup: self.pickup.clone(),
                        dropoff: self.dropoff.clone(),
                    },
                }
            }
            UiAction::AssignDriver { ride_id, driver_id } => BackendCommand::AssignDriver {
                seq: self.next_seq(),
                ride_id,
                driver_id,
            },
            UiAction::UpdateRideStatus { ride_id, status } => BackendCommand::UpdateRideStatus {
                seq: self.next_seq(),
                ride_id,
                status,
            },
            UiAction::LoadRides => BackendCommand::LoadRides {
                seq: self.next_seq(),
                rider_id: self.rider_id.clone(),
            },
        };
        Ok(cmd)
    }

    pub fn apply(&mut self, event: UiEvent) -> Vec<UiAction> {
        match event {
            UiEvent::Error(err) => {
                self.status_message = err.status_message();
                Vec::new()
            }
            UiEvent::UserCreated { seq, role, result } => {
                match result {
                    Ok(id) => {
                        let (clock, slot) = match role {
                            Role::Rider => (&mut self.clocks.rider_id, &mut self.rider_id),
                            Role::Driver => (&mut self.clocks.driver_id, &mut self.driver_id),
                        };
                        if clock.admit(seq) {
                            *slot = non_empty(id);
                        }
                        self.set_status(seq, &format!("{role} created"));
                    }
                    Err(err) => self.set_status(seq, &err.status_message()),
                }
                Vec::new()
            }
            UiEvent::DriversLoaded { seq, result } => {
                self.settle_driver_refresh(seq);
                match result {
                    Ok(drivers) => {
                        if self.clocks.drivers.admit(seq) {
                            self.drivers = drivers;
                        } else {
                            tracing::debug!(seq = seq.0, "discarding stale driver list");
                        }
                    }
                    Err(err) => self.set_status(seq, &err.status_message()),
                }
                Vec::new()
            }
            UiEvent::DriverStatusUpdated { seq, result } => match result {
                Ok(()) => {
                    self.set_status(seq, "Driver status updated");
                    vec![UiAction::RefreshDrivers]
                }
                Err(err) => {
                    self.set_status(seq, &err.status_message());
                    Vec::new()
                }
            },
            UiEvent::RideRequested { seq, result } => match result {
                Ok(ride_id) => {
                    if self.clocks.ride_id.admit(seq) {
                        self.ride_id = Some(ride_id).filter(|id| !id.as_str().is_empty());
                    }
                    self.set_status(seq, "Ride requested");
                    vec![UiAction::LoadRides]
                }
                Err(err) => {
                    self.set_status(seq, &err.status_message());
                    Vec::new()
                }
            },
            UiEvent::DriverAssigned { seq, result } => match result {
                Ok(()) => {
                    self.set_status(seq, "Driver assigned");
                    vec![UiAction::LoadRides]
                }
                Err(err) => {
                    self.set_status(seq, &err.status_message());
                    Vec::new()
                }
            },
            UiEvent::RideStatusUpdated {
                seq,
                status,
                result,
            } => match result {
                Ok(()) => {
                    self.set_status(seq, &format!("Ride {status}"));
                    vec![UiAction::LoadRides]
                }
                Err(err) => {
                    self.set_status(seq, &err.status_message());
                    Vec::new()
                }
            },
            UiEvent::RidesLoaded { seq, result } => {
                match result {
                    Ok(rides) => {
                        if self.clocks.rides.admit(seq) {
                            self.rides = rides;
                        } else {
                            tracing::debug!(seq = seq.0, "discarding stale ride list");
                        }
                    }
                    Err(err) => self.set_status(seq, &err.status_message()),
                }
                Vec::new()
            }
        }
    }

    /// Forgets a command that never reached the worker.
    pub fn abandon(&mut self, seq: RequestSeq) {
        self.driver_refreshes.remove(&seq);
    }

    /// The newest refresh settling ends loading even if older ones are
    /// still out.
    fn settle_driver_refresh(&mut self, seq: RequestSeq) {
        if self.driver_refreshes.last() == Some(&seq) {
            self.driver_refreshes.clear();
        } else {
            self.driver_refreshes.remove(&seq);
        }
    }

    fn next_seq(&mut self) -> RequestSeq {
        self.last_seq += 1;
        RequestSeq(self.last_seq)
    }

    fn set_status(&mut self, seq: RequestSeq, message: &str) {
        if self.clocks.status.admit(seq) {
            self.status_message = message.to_string();
        }
    }
}

fn non_empty(id: UserId) -> Option<UserId> {
    Some(id).filter(|id| !id.as_str().is_empty())
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
