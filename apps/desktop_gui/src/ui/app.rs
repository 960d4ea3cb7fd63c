use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_action,
    reducer::UiAction,
    state::ViewState,
};
use crate::ui::{panels, widgets::MUTED};

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: ViewState,
    backend_url: String,
}

impl DesktopGuiApp {
    /// Builds the app and queues the start-up driver refresh.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        backend_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: ViewState::default(),
            backend_url,
        };
        app.dispatch(UiAction::RefreshDrivers);
        app
    }

    fn dispatch(&mut self, action: UiAction) {
        dispatch_action(&self.cmd_tx, &mut self.state, action);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            for follow_up in self.state.apply(event) {
                self.dispatch(follow_up);
            }
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header")
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.extreme_bg_color)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Bike Taxi");
                    ui.weak("Riders, drivers and rides");
                });
            });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("backend_footer")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.colored_label(MUTED, format!("Backend: {}", self.backend_url));
                });
            });
    }

    fn show_workspace(&mut self, ctx: &egui::Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::show_status(ui, &self.state);
                    ui.columns(2, |columns| {
                        panels::show_users(&mut columns[0], &mut self.state, &mut actions);
                        panels::show_driver_status(&mut columns[0], &mut self.state, &mut actions);
                        panels::show_ride_request(&mut columns[0], &mut self.state, &mut actions);
                        panels::show_drivers(&mut columns[1], &self.state, &mut actions);
                    });
                    panels::show_rides(ui, &self.state, &mut actions);
                });
        });
        actions
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        for action in self.show_workspace(ctx) {
            self.dispatch(action);
        }

        // Backend results arrive off-thread; keep polling the event queue.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
