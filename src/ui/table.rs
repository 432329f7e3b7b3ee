use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{TransactionTable, COL_ACCOUNT, COL_DATE, COL_TYPE, COL_VALUE};
use crate::format::format_rupiah;

const ROW_HEIGHT: f32 = 20.0;

/// Detail table of the filtered view. Values are display-formatted here only;
/// the export path writes the raw numbers.
pub fn detail_table(ui: &mut Ui, view: &TransactionTable) {
    ui.heading("Detail Transaksi");

    TableBuilder::new(ui)
        .id_salt("detail_table")
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(140.0))
        .max_scroll_height(400.0)
        .header(ROW_HEIGHT, |mut header| {
            for name in [COL_DATE, COL_ACCOUNT, COL_TYPE, COL_VALUE] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            let records = view.records();
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let rec = &records[row.index()];
                row.col(|ui| {
                    ui.label(rec.transaction_date.format("%Y-%m-%d").to_string());
                });
                row.col(|ui| {
                    ui.label(&rec.expense_account);
                });
                row.col(|ui| {
                    ui.label(&rec.expense_type);
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format_rupiah(rec.transaction_value));
                    });
                });
            });
        });
}
