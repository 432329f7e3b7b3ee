use std::time::Instant;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{charts, kpi, panels, table, toast};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }

    /// Step the KPI counter and schedule the frame its next step is due.
    fn tick_counter(&mut self, ctx: &egui::Context) {
        if let Some(wait) = self.state.counter.tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.expire_toast();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: reload / reset / filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });

        if let Some(t) = &self.state.toast {
            toast::show_toast(ctx, t);
        }

        self.tick_counter(ctx);
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = match &state.load_error {
                Some(err) => format!("File Excel tidak ditemukan atau data kosong!\n\n{err}"),
                None => "File Excel tidak ditemukan atau data kosong!".to_string(),
            };
            ui.label(RichText::new(msg).color(ui.visuals().error_fg_color));
        });
        return;
    }

    ui.heading("Dashboard Realisasi Anggaran Pajak");
    if let Some(at) = state.last_updated {
        ui.weak(format!("Update Terakhir: {}", at.format("%H:%M:%S")));
    }
    ui.add_space(8.0);

    kpi::kpi_row(ui, state);
    ui.separator();

    ui.columns(2, |cols| {
        charts::account_bar_chart(&mut cols[0], &state.summary);
        charts::composition_chart(&mut cols[1], &state.summary, &state.color_map);
    });
    ui.separator();

    charts::daily_trend_chart(ui, &state.summary);
    ui.separator();

    table::detail_table(ui, &state.view);
    ui.add_space(8.0);

    if ui.button("📥 Download Excel").clicked() {
        panels::export_file_dialog(state);
    }
}
