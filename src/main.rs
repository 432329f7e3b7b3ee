mod animation;
mod app;
mod color;
mod config;
mod data;
mod format;
mod state;
mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use app::DashboardApp;
use clap::Parser;
use config::Settings;
use data::loader::load;
use data::summary::{summarize, Summary};
use eframe::egui;
use format::format_rupiah;

/// Budget realization dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Transaction workbook (.xlsx, .xls, .ods, .csv or .parquet).
    source: Option<PathBuf>,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a summary of the whole source to stdout instead of opening the window.
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(source) = cli.source {
        settings.source_path = source;
    }

    if cli.summary {
        return print_summary(&settings);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let title = settings.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")?;

    Ok(ExitCode::SUCCESS)
}

fn print_summary(settings: &Settings) -> Result<ExitCode> {
    let (table, err) = load(&settings.source_path);
    if let Some(err) = err {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    let summary = summarize(&table);
    let stdout = std::io::stdout();
    write_summary(&mut stdout.lock(), &summary).context("writing summary")?;
    Ok(ExitCode::SUCCESS)
}

fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(out, "Total Realisasi : {}", format_rupiah(summary.total_value))?;
    writeln!(out, "Jumlah Transaksi: {}", summary.transaction_count)?;
    let mean = summary.mean_value.map(format_rupiah).unwrap_or_else(|| "0".to_string());
    writeln!(out, "Rata-rata       : {mean}")?;

    writeln!(out, "\nRealisasi per Akun")?;
    for (account, value) in &summary.by_account {
        writeln!(out, "  {account:<12} {}", format_rupiah(*value))?;
    }

    writeln!(out, "\nKomposisi Belanja")?;
    for (expense_type, share) in summary.type_shares() {
        let value = summary.by_type[&expense_type];
        writeln!(
            out,
            "  {expense_type:<24} {:>6.1}%  {}",
            share * 100.0,
            format_rupiah(value)
        )?;
    }

    writeln!(out, "\nTren Realisasi Harian")?;
    for (day, value) in &summary.by_day {
        writeln!(out, "  {day}  {}", format_rupiah(*value))?;
    }
    Ok(())
}
