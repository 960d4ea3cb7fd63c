//! View state snapshot and the read-only views the UI renders from it.

use std::collections::BTreeSet;

use shared::{
    domain::{RideId, UserId},
    protocol::{DriverSummary, RideSummary},
};

use crate::backend_bridge::commands::RequestSeq;

pub const DEFAULT_RIDER_NAME: &str = "Alex Rider";
pub const DEFAULT_DRIVER_NAME: &str = "Blaze Driver";
pub const DEFAULT_PICKUP: &str = "Downtown Plaza";
pub const DEFAULT_DROPOFF: &str = "City Park Gate";

pub const UNSET_LABEL: &str = "—";
pub const NO_DRIVERS_PLACEHOLDER: &str = "No drivers yet. Create one above.";
pub const NO_RIDES_PLACEHOLDER: &str = "No rides yet";
pub const LOADING_DRIVERS_LABEL: &str = "Loading drivers…";

/// Remembers the newest request that wrote a state slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotClock {
    last_applied: Option<RequestSeq>,
}

impl SlotClock {
    /// Returns false when a newer request already wrote the slot.
    pub fn admit(&mut self, seq: RequestSeq) -> bool {
        match self.last_applied {
            Some(last) if seq < last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SlotClocks {
    pub(crate) rider_id: SlotClock,
    pub(crate) driver_id: SlotClock,
    pub(crate) ride_id: SlotClock,
    pub(crate) drivers: SlotClock,
    pub(crate) rides: SlotClock,
    pub(crate) status: SlotClock,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub rider_name: String,
    pub driver_name: String,
    pub rider_id: Option<UserId>,
    pub driver_id: Option<UserId>,

    pub driver_available: bool,
    pub driver_lat: String,
    pub driver_lng: String,

    pub drivers: Vec<DriverSummary>,

    pub pickup: String,
    pub dropoff: String,
    pub ride_id: Option<RideId>,
    pub rides: Vec<RideSummary>,

    pub status_message: String,

    pub(crate) last_seq: u64,
    /// Driver refreshes queued and not yet settled.
    pub(crate) driver_refreshes: BTreeSet<RequestSeq>,
    pub(crate) clocks: SlotClocks,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rider_name: DEFAULT_RIDER_NAME.to_string(),
            driver_name: DEFAULT_DRIVER_NAME.to_string(),
            rider_id: None,
            driver_id: None,
            driver_available: true,
            driver_lat: String::new(),
            driver_lng: String::new(),
            drivers: Vec::new(),
            pickup: DEFAULT_PICKUP.to_string(),
            dropoff: DEFAULT_DROPOFF.to_string(),
            ride_id: None,
            rides: Vec::new(),
            status_message: String::new(),
            last_seq: 0,
            driver_refreshes: BTreeSet::new(),
            clocks: SlotClocks::default(),
        }
    }
}

pub enum DriversView<'a> {
    Loading,
    Empty,
    Cards(Vec<DriverCard<'a>>),
}

pub struct DriverCard<'a> {
    pub driver: &'a DriverSummary,
    pub availability_label: &'static str,
    pub coordinates_label: Option<String>,
    /// Ride the driver can be assigned to, when the action is offered.
    pub assign_to: Option<&'a RideId>,
}

pub struct RideRow<'a> {
    pub ride: &'a RideSummary,
    pub driver_label: &'a str,
}

impl ViewState {
    pub fn loading_drivers(&self) -> bool {
        !self.driver_refreshes.is_empty()
    }

    pub fn rider_id_label(&self) -> String {
        id_label(self.rider_id.as_ref().map(UserId::as_str))
    }

    pub fn driver_id_label(&self) -> String {
        id_label(self.driver_id.as_ref().map(UserId::as_str))
    }

    pub fn ride_id_label(&self) -> String {
        format!(
            "Current Ride ID: {}",
            self.ride_id
                .as_ref()
                .map(RideId::as_str)
                .unwrap_or(UNSET_LABEL)
        )
    }

    /// The assign action depends only on the last fetched availability flag.
    pub fn assign_target(&self, driver: &DriverSummary) -> Option<&RideId> {
        self.ride_id.as_ref().filter(|_| driver.is_available())
    }

    pub fn drivers_view(&self) -> DriversView<'_> {
        if self.loading_drivers() {
            return DriversView::Loading;
        }
        if self.drivers.is_empty() {
            return DriversView::Empty;
        }
        DriversView::Cards(
            self.drivers
                .iter()
                .map(|driver| DriverCard {
                    driver,
                    availability_label: if driver.is_available() {
                        "Available"
                    } else {
                        "Unavailable"
                    },
                    coordinates_label: driver
                        .status
                        .as_ref()
                        .and_then(|status| status.coordinates())
                        .map(|(lat, lng)| format!("({lat}, {lng})")),
                    assign_to: self.assign_target(driver),
                })
                .collect(),
        )
    }

    pub fn ride_rows(&self) -> Vec<RideRow<'_>> {
        self.rides
            .iter()
            .map(|ride| RideRow {
                ride,
                driver_label: ride
                    .driver_id
                    .as_ref()
                    .map(UserId::as_str)
                    .unwrap_or(UNSET_LABEL),
            })
            .collect()
    }
}

fn id_label(id: Option<&str>) -> String {
    format!("ID: {}", id.unwrap_or(UNSET_LABEL))
}
