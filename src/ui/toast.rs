use eframe::egui::{self, Align2, Color32, RichText};

use crate::state::{Toast, ToastKind, TOAST_TTL};

/// Floating notification in the bottom-right corner.
pub fn show_toast(ctx: &egui::Context, toast: &Toast) {
    let (icon, color) = match toast.kind {
        ToastKind::Info => ("💰", Color32::from_rgb(40, 160, 90)),
        ToastKind::Warning => ("⚠", Color32::from_rgb(220, 150, 40)),
    };

    egui::Area::new(egui::Id::new("toast"))
        .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(RichText::new(format!("{icon} {}", toast.message)).color(color));
            });
        });

    ctx.request_repaint_after(TOAST_TTL.saturating_sub(toast.shown_at.elapsed()));
}
