use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Polygon};

use crate::color::{blues, ColorMap};
use crate::data::summary::Summary;
use crate::format::format_rupiah;

const CHART_HEIGHT: f32 = 350.0;

/// Inner radius of the composition donut, relative to the outer one.
const DONUT_HOLE: f64 = 0.4;

/// Max angle of one donut segment. egui fills polygons as convex shapes, so
/// each slice is drawn as a run of thin annular quads.
const DONUT_SEGMENT: f64 = TAU / 180.0;

fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.weak("Tidak ada data untuk filter ini.");
    });
}

// ---------------------------------------------------------------------------
// Realization per account (horizontal bars, ascending)
// ---------------------------------------------------------------------------

pub fn account_bar_chart(ui: &mut Ui, summary: &Summary) {
    ui.heading("Realisasi per Akun");
    if summary.by_account.is_empty() {
        ui.allocate_ui([ui.available_width(), CHART_HEIGHT].into(), no_data);
        return;
    }

    let max = summary
        .by_account
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::MIN, f64::max)
        .max(f64::EPSILON);

    let bars: Vec<Bar> = summary
        .by_account
        .iter()
        .enumerate()
        .map(|(i, (account, value))| {
            Bar::new(i as f64, *value)
                .name(account)
                .fill(blues(*value / max))
        })
        .collect();

    let labels: Vec<String> = summary.by_account.iter().map(|(a, _)| a.clone()).collect();

    Plot::new("account_bars")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid(false)
        .x_axis_label("Nilai Transaksi")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Akun Belanja"));
        });
}

// ---------------------------------------------------------------------------
// Composition by expense type (donut)
// ---------------------------------------------------------------------------

/// Annular segments for one slice spanning `[from, to]` radians.
fn donut_slice(from: f64, to: f64) -> Vec<Vec<[f64; 2]>> {
    let n = ((to - from) / DONUT_SEGMENT - 1e-9).ceil().max(1.0) as usize;
    let step = (to - from) / n as f64;
    let point = |angle: f64, r: f64| [r * angle.cos(), r * angle.sin()];

    (0..n)
        .map(|i| {
            let a = from + step * i as f64;
            let b = a + step;
            vec![
                point(a, DONUT_HOLE),
                point(a, 1.0),
                point(b, 1.0),
                point(b, DONUT_HOLE),
            ]
        })
        .collect()
}

pub fn composition_chart(ui: &mut Ui, summary: &Summary, colors: &ColorMap) {
    ui.heading("Komposisi Belanja");
    let shares = summary.type_shares();
    if shares.is_empty() {
        ui.allocate_ui([ui.available_width(), CHART_HEIGHT].into(), no_data);
        return;
    }

    Plot::new("composition_donut")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .label_formatter(|name, _| name.to_string())
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock.
            let mut angle = FRAC_PI_2;
            for (expense_type, share) in &shares {
                let sweep = share * TAU;
                let color = colors.color_for(expense_type);
                let name = format!("{expense_type} ({:.1}%)", share * 100.0);
                for quad in donut_slice(angle - sweep, angle) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(0.5, color)),
                    );
                }
                angle -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Daily trend (area)
// ---------------------------------------------------------------------------

fn day_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_day(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

pub fn daily_trend_chart(ui: &mut Ui, summary: &Summary) {
    ui.heading("Tren Realisasi Harian");
    if summary.by_day.is_empty() {
        ui.allocate_ui([ui.available_width(), CHART_HEIGHT].into(), no_data);
        return;
    }

    let points: PlotPoints = summary
        .by_day
        .iter()
        .map(|(day, value)| [day_to_x(*day), *value])
        .collect();

    Plot::new("daily_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Tanggal Transaksi")
        .y_axis_label("Nilai Transaksi")
        .x_axis_formatter(|mark, _range| {
            x_to_day(mark.value)
                .map(|d| d.format("%d %b %Y").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_, point| match x_to_day(point.x) {
            Some(day) => format!("{}\n{}", day.format("%Y-%m-%d"), format_rupiah(point.y)),
            None => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Nilai Transaksi")
                    .color(Color32::from_rgb(70, 130, 200))
                    .fill(0.0)
                    .width(2.0),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_segments_cover_the_sweep() {
        let quads = donut_slice(0.0, FRAC_PI_2);

        assert_eq!(quads.len(), 45);
        let first = quads.first().unwrap();
        let last = quads.last().unwrap();
        assert!((first[1][0] - 1.0).abs() < 1e-9);
        assert!((last[2][1] - 1.0).abs() < 1e-9);
        assert!((last[3][1] - DONUT_HOLE).abs() < 1e-9);
    }

    #[test]
    fn tiny_slice_still_draws() {
        assert_eq!(donut_slice(1.0, 1.0 + 1e-6).len(), 1);
    }

    #[test]
    fn day_axis_round_trips() {
        let day = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        assert_eq!(x_to_day(day_to_x(day)), Some(day));
        assert_eq!(x_to_day(day_to_x(day) + 0.3), Some(day));
    }
}
