use eframe::egui::{Color32, Response, RichText, Ui};

use crate::format::{format_grouped, format_rupiah};
use crate::state::AppState;

/// Total / count / mean cards. The total follows the counter animation.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    let counter = &state.counter;

    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            "Total Realisasi",
            format!("Rp {}", format_grouped(counter.current())),
            Some(counter.delta()),
        )
        .on_hover_text(format!("Total: {}", format_rupiah(counter.target())));
        metric(
            &mut cols[1],
            "Jumlah Transaksi",
            summary.transaction_count.to_string(),
            None,
        );
        let mean = summary
            .mean_value
            .map(|m| format!("Rp {}", format_grouped(m)))
            .unwrap_or_else(|| "0".to_string());
        metric(&mut cols[2], "Rata-rata", mean, None);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String, delta: Option<f64>) -> Response {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
        if let Some(delta) = delta {
            let (arrow, color) = if delta < 0.0 {
                ("↓", Color32::from_rgb(220, 70, 70))
            } else {
                ("↑", Color32::from_rgb(40, 160, 90))
            };
            ui.label(RichText::new(format!("{arrow} {}", format_grouped(delta))).color(color));
        }
    })
    .response
}
