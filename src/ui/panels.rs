use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – reload, reset, and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter");
    ui.separator();

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui.button("Ambil Data Terbaru").clicked() {
            state.reload();
        }
        if ui.button("Reset Filter").clicked() {
            state.reset_filters();
        }
    });
    if !state.table.is_empty() {
        let status = if state.filters.is_default_for(&state.table) {
            "Menampilkan semua data"
        } else {
            "Filter aktif"
        };
        ui.label(RichText::new(status).weak());
    }
    ui.separator();

    let Some((min_date, max_date)) = state.table.date_bounds() else {
        ui.label("Belum ada data.");
        return;
    };

    // ---- Date range: both ends must be set for the range to apply ----
    ui.strong("Rentang Waktu:");
    let range = state.filters.date_range;
    if let Some(start) = date_endpoint(ui, "date_start", "Dari", range.start, min_date) {
        state.set_date_start(start);
    }
    if let Some(end) = date_endpoint(ui, "date_end", "Sampai", range.end, max_date) {
        state.set_date_end(end);
    }
    if state.filters.date_range.bounds().is_none() {
        ui.label(RichText::new("Pilih kedua tanggal untuk menyaring.").weak());
    }
    ui.separator();

    // ---- Expense type multiselect ----
    let all_types = state.table.expense_types().clone();
    let header_text = format!(
        "Jenis Belanja:  ({}/{})",
        state.filters.expense_types.len(),
        all_types.len()
    );
    ui.strong(header_text);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Semua").clicked() {
            state.select_all_types();
        }
        if ui.small_button("Kosongkan").clicked() {
            state.select_no_types();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for expense_type in &all_types {
                let mut checked = state.filters.expense_types.contains(expense_type);
                let text = RichText::new(expense_type).color(state.color_map.color_for(expense_type));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_expense_type(expense_type);
                }
            }
        });
}

/// One end of the date range. Returns `Some(new_value)` when the user changed it.
fn date_endpoint(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: Option<NaiveDate>,
    fallback: NaiveDate,
) -> Option<Option<NaiveDate>> {
    let mut changed = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        match current {
            Some(mut date) => {
                if ui.add(DatePickerButton::new(&mut date).id_salt(id)).changed() {
                    changed = Some(Some(date));
                }
                if ui.small_button("✖").on_hover_text("Kosongkan").clicked() {
                    changed = Some(None);
                }
            }
            None => {
                if ui.button("Pilih tanggal").clicked() {
                    changed = Some(Some(fallback));
                }
            }
        }
    });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Buka…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Ekspor…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.table.is_empty() {
            ui.label(format!(
                "{} transaksi dimuat, {} ditampilkan",
                state.table.len(),
                state.view.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Buka data pembukuan")
        .add_filter("Didukung", &["xlsx", "xlsm", "xls", "ods", "csv", "parquet", "pq"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Simpan data tersaring")
        .set_file_name(&state.settings.export_filename)
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        // The state records the failure in `status_message`.
        let _ = state.export_view(&path);
    }
}
