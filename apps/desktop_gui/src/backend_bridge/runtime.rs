//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{BikeTaxiApi, BikeTaxiClient, ClientError, ClientSettings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    UiErrorCategory::Configuration,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api: Arc<dyn BikeTaxiApi> = match BikeTaxiClient::from_settings(&settings) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                tracing::error!("failed to build backend client: {err}");
                return;
            }
        };

        tracing::info!(backend_url = %settings.backend_url, "backend worker ready");
        runtime.block_on(run_worker(api, cmd_rx, ui_tx));
    });
}

/// Spawns one task per command so slow requests never hold up later ones.
async fn run_worker(
    api: Arc<dyn BikeTaxiApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let api = Arc::clone(&api);
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), cmd).await;
            deliver(&ui_tx, event);
        });
    }
    tracing::debug!("ui command queue closed; backend worker stopping");
}

/// Waits for room in the UI queue; results are only lost once the UI is gone.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let delivered = tokio::task::block_in_place(|| ui_tx.send(event)).is_ok();
    if !delivered {
        tracing::debug!("ui event queue closed; dropping backend result");
    }
    delivered
}

pub async fn execute(api: &dyn BikeTaxiApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::CreateUser { seq, user } => UiEvent::UserCreated {
            seq,
            role: user.role,
            result: settle(UiErrorContext::CreateUser, api.create_user(&user).await),
        },
        BackendCommand::RefreshDrivers { seq } => UiEvent::DriversLoaded {
            seq,
            result: settle(UiErrorContext::RefreshDrivers, api.list_drivers().await),
        },
        BackendCommand::UpdateDriverStatus { seq, update } => UiEvent::DriverStatusUpdated {
            seq,
            result: settle(
                UiErrorContext::UpdateDriverStatus,
                api.update_driver_status(&update).await,
            ),
        },
        BackendCommand::RequestRide { seq, request } => UiEvent::RideRequested {
            seq,
            result: settle(UiErrorContext::RequestRide, api.request_ride(&request).await),
        },
        BackendCommand::AssignDriver {
            seq,
            ride_id,
            driver_id,
        } => UiEvent::DriverAssigned {
            seq,
            result: settle(
                UiErrorContext::AssignDriver,
                api.assign_driver(&ride_id, &driver_id).await,
            ),
        },
        BackendCommand::UpdateRideStatus {
            seq,
            ride_id,
            status,
        } => UiEvent::RideStatusUpdated {
            seq,
            status,
            result: settle(
                UiErrorContext::UpdateRideStatus,
                api.update_ride_status(&ride_id, status).await,
            ),
        },
        BackendCommand::LoadRides { seq, rider_id } => UiEvent::RidesLoaded {
            seq,
            result: settle(
                UiErrorContext::LoadRides,
                api.list_rides(rider_id.as_ref()).await,
            ),
        },
    }
}

fn settle<T>(context: UiErrorContext, result: Result<T, ClientError>) -> Result<T, UiError> {
    result.map_err(|err| {
        let ui_err = UiError::from_client_error(context, &err);
        tracing::debug!(
            operation = ?err.operation(),
            context = ?ui_err.context(),
            category = ?ui_err.category(),
            "{}",
            ui_err.message()
        );
        ui_err
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
