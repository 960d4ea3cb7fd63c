//! Section renderers. Each one reads the view state, lets egui edit the form
//! fields in place, and records button clicks as actions for the app shell.

use eframe::egui;
use shared::domain::{RideTransition, Role};

use crate::controller::{
    reducer::UiAction,
    state::{
        DriversView, ViewState, LOADING_DRIVERS_LABEL, NO_DRIVERS_PLACEHOLDER,
        NO_RIDES_PLACEHOLDER,
    },
};
use crate::ui::widgets::{
    action_button, card, labeled_text_edit, DANGER, MUTED, PRIMARY, SUCCESS, WARNING,
};

pub fn show_users(ui: &mut egui::Ui, state: &mut ViewState, actions: &mut Vec<UiAction>) {
    card(ui, "Users", |ui| {
        egui::Grid::new("users_grid")
            .num_columns(4)
            .spacing(egui::vec2(10.0, 8.0))
            .show(ui, |ui| {
                labeled_text_edit(ui, "Rider name", &mut state.rider_name, "Rider name");
                if action_button(ui, "Create rider", PRIMARY).clicked() {
                    actions.push(UiAction::CreateUser(Role::Rider));
                }
                ui.monospace(state.rider_id_label());
                ui.end_row();

                labeled_text_edit(ui, "Driver name", &mut state.driver_name, "Driver name");
                if action_button(ui, "Create driver", PRIMARY).clicked() {
                    actions.push(UiAction::CreateUser(Role::Driver));
                }
                ui.monospace(state.driver_id_label());
                ui.end_row();
            });
    });
}

pub fn show_driver_status(ui: &mut egui::Ui, state: &mut ViewState, actions: &mut Vec<UiAction>) {
    card(ui, "Driver availability", |ui| {
        ui.horizontal(|ui| {
            ui.checkbox(&mut state.driver_available, "Available");
            labeled_text_edit(ui, "Lat", &mut state.driver_lat, "optional");
            labeled_text_edit(ui, "Lng", &mut state.driver_lng, "optional");
        });
        ui.add_space(4.0);
        if action_button(ui, "Update status", SUCCESS).clicked() {
            actions.push(UiAction::UpdateDriverStatus);
        }
    });
}

pub fn show_drivers(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<UiAction>) {
    card(ui, "Drivers", |ui| {
        if action_button(ui, "Refresh", MUTED).clicked() {
            actions.push(UiAction::RefreshDrivers);
        }
        ui.add_space(6.0);

        match state.drivers_view() {
            DriversView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(LOADING_DRIVERS_LABEL);
                });
            }
            DriversView::Empty => {
                ui.weak(NO_DRIVERS_PLACEHOLDER);
            }
            DriversView::Cards(cards) => {
                for driver_card in cards {
                    egui::Frame::new()
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.strong(&driver_card.driver.name);
                                ui.weak(driver_card.driver.id.as_str());
                            });
                            ui.horizontal(|ui| {
                                let color = if driver_card.driver.is_available() {
                                    SUCCESS
                                } else {
                                    MUTED
                                };
                                ui.colored_label(color, driver_card.availability_label);
                                if let Some(coordinates) = &driver_card.coordinates_label {
                                    ui.label(coordinates);
                                }
                            });
                            if let Some(ride_id) = driver_card.assign_to {
                                if action_button(ui, "Assign to current ride", PRIMARY).clicked()
                                {
                                    actions.push(UiAction::AssignDriver {
                                        ride_id: ride_id.clone(),
                                        driver_id: driver_card.driver.id.clone(),
                                    });
                                }
                            }
                        });
                    ui.add_space(4.0);
                }
            }
        }
    });
}

pub fn show_ride_request(ui: &mut egui::Ui, state: &mut ViewState, actions: &mut Vec<UiAction>) {
    card(ui, "Request a ride", |ui| {
        ui.horizontal(|ui| {
            labeled_text_edit(ui, "Pickup", &mut state.pickup, "Pickup");
            labeled_text_edit(ui, "Dropoff", &mut state.dropoff, "Dropoff");
        });
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if action_button(ui, "Request ride", PRIMARY).clicked() {
                actions.push(UiAction::RequestRide);
            }
            ui.monospace(state.ride_id_label());
        });
    });
}

pub fn show_rides(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<UiAction>) {
    card(ui, "Rides", |ui| {
        if action_button(ui, "Load rides", MUTED).clicked() {
            actions.push(UiAction::LoadRides);
        }
        ui.add_space(6.0);

        let rows = state.ride_rows();
        if rows.is_empty() {
            ui.weak(NO_RIDES_PLACEHOLDER);
            return;
        }

        egui::Grid::new("rides_grid")
            .num_columns(6)
            .striped(true)
            .spacing(egui::vec2(14.0, 6.0))
            .show(ui, |ui| {
                for heading in ["ID", "Pickup", "Dropoff", "Status", "Driver", "Actions"] {
                    ui.strong(heading);
                }
                ui.end_row();

                for row in rows {
                    ui.monospace(row.ride.id.as_str());
                    ui.label(&row.ride.pickup);
                    ui.label(&row.ride.dropoff);
                    ui.label(row.ride.status.as_str());
                    ui.monospace(row.driver_label);
                    ui.horizontal(|ui| {
                        for status in RideTransition::ALL {
                            if action_button(ui, status.action_label(), transition_color(status))
                                .clicked()
                            {
                                actions.push(UiAction::UpdateRideStatus {
                                    ride_id: row.ride.id.clone(),
                                    status,
                                });
                            }
                        }
                    });
                    ui.end_row();
                }
            });
    });
}

pub fn show_status(ui: &mut egui::Ui, state: &ViewState) {
    if state.status_message.is_empty() {
        return;
    }
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(&state.status_message);
        });
    ui.add_space(8.0);
}

fn transition_color(status: RideTransition) -> egui::Color32 {
    match status {
        RideTransition::PickedUp => WARNING,
        RideTransition::Completed => SUCCESS,
        RideTransition::Cancelled => DANGER,
    }
}
