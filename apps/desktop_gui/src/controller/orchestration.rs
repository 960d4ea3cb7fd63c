//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{reducer::UiAction, state::ViewState};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    let seq = cmd.seq().0;

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, seq, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

/// Runs an action through the reducer and queues the resulting command, if any.
pub fn dispatch_action(cmd_tx: &Sender<BackendCommand>, state: &mut ViewState, action: UiAction) {
    if let Some(cmd) = state.begin(action) {
        let seq = cmd.seq();
        if !dispatch_backend_command(cmd_tx, cmd, &mut state.status_message) {
            state.abandon(seq);
        }
    }
}
