//! Small egui building blocks shared by the panels.

use eframe::egui;

pub const PRIMARY: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
pub const WARNING: egui::Color32 = egui::Color32::from_rgb(217, 119, 6);
pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round() as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

/// Rounded section frame with a heading.
pub fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    let fill = lighten_color(ui.visuals().panel_fill, 0.04);
    egui::Frame::new()
        .fill(fill)
        .corner_radius(10.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(16.0));
            ui.add_space(6.0);
            add_contents(ui);
        });
    ui.add_space(10.0);
}

pub fn action_button(
    ui: &mut egui::Ui,
    label: impl Into<String>,
    fill: egui::Color32,
) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(4))
            .min_size(egui::vec2(68.0, 22.0)),
    )
}

pub fn labeled_text_edit(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(180.0),
    );
}
