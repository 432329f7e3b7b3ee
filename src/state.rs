use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};

use crate::animation::CounterAnimation;
use crate::color::ColorMap;
use crate::config::Settings;
use crate::data::export::{export_to_path, ExportError};
use crate::data::filter::FilterState;
use crate::data::loader::{load, LoadError};
use crate::data::model::TransactionTable;
use crate::data::summary::{summarize, Summary};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Toast notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Workbook the table was (or failed to be) loaded from.
    pub source_path: PathBuf,

    /// Loaded transactions; empty when the last load failed.
    pub table: TransactionTable,

    /// Set when the last load failed.
    pub load_error: Option<LoadError>,

    /// Current date-range and expense-type selections.
    pub filters: FilterState,

    /// Rows passing the current filters (cached).
    pub view: TransactionTable,

    /// Aggregates of `view`.
    pub summary: Summary,

    /// Total shown before the latest recompute; the KPI counter starts here.
    pub prev_total: f64,

    pub counter: CounterAnimation,

    /// Colour per expense type, rebuilt on every load.
    pub color_map: ColorMap,

    /// Wall-clock time of the last successful load.
    pub last_updated: Option<DateTime<Local>>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub toast: Option<Toast>,
}

impl AppState {
    /// Build the state and load `settings.source_path`.
    pub fn new(settings: Settings) -> Self {
        let source_path = settings.source_path.clone();
        let mut state = Self {
            settings,
            source_path,
            table: TransactionTable::default(),
            load_error: None,
            filters: FilterState::default(),
            view: TransactionTable::default(),
            summary: Summary::default(),
            prev_total: 0.0,
            counter: CounterAnimation::default(),
            color_map: ColorMap::default(),
            last_updated: None,
            status_message: None,
            toast: None,
        };
        state.reload();
        state
    }

    /// Discard the cached table and read the source again.
    pub fn reload(&mut self) {
        let (table, err) = load(&self.source_path);
        self.set_table(table, err);
    }

    /// Switch to another source file and load it.
    pub fn open(&mut self, path: &Path) {
        self.source_path = path.to_path_buf();
        self.reload();
    }

    /// Ingest a freshly loaded table and reset filters to its full extent.
    pub fn set_table(&mut self, table: TransactionTable, err: Option<LoadError>) {
        self.filters = FilterState::for_table(&table);
        self.color_map = ColorMap::new(table.expense_types());
        self.table = table;
        self.status_message = err.as_ref().map(|e| e.to_string());
        if err.is_none() {
            self.last_updated = Some(Local::now());
        }
        self.load_error = err;
        self.refilter();
    }

    /// Restore the default filters for the current table.
    pub fn reset_filters(&mut self) {
        if self.table.is_empty() {
            log::warn!("Reset requested with no data loaded");
        }
        self.filters = FilterState::for_table(&self.table);
        self.refilter();
        self.toast = Some(Toast::new("Filter berhasil direset", ToastKind::Info));
    }

    /// Recompute the view and summary after a filter change, and start the
    /// KPI counter from the previous total.
    pub fn refilter(&mut self) {
        self.view = self.filters.apply(&self.table);
        self.summary = summarize(&self.view);
        log::debug!(
            "Filtered {} of {} transactions, total {}",
            self.view.len(),
            self.table.len(),
            self.summary.total_value
        );

        let new_total = self.summary.total_value;
        self.counter = CounterAnimation::start(
            self.prev_total,
            new_total,
            self.settings.animation_steps,
            self.settings.animation_step(),
        );
        self.prev_total = new_total;

        self.toast = Some(if self.view.is_empty() {
            Toast::new("Data tidak ditemukan untuk filter ini.", ToastKind::Warning)
        } else {
            Toast::new(
                format!("Berhasil memuat {} transaksi!", self.view.len()),
                ToastKind::Info,
            )
        });
    }

    /// Toggle a single expense type in the selection.
    pub fn toggle_expense_type(&mut self, expense_type: &str) {
        if !self.filters.expense_types.remove(expense_type) {
            self.filters.expense_types.insert(expense_type.to_string());
        }
        self.refilter();
    }

    /// Select every expense type in the table.
    pub fn select_all_types(&mut self) {
        self.filters.expense_types = self.table.expense_types().clone();
        self.refilter();
    }

    /// Deselect every expense type.
    pub fn select_no_types(&mut self) {
        self.filters.expense_types.clear();
        self.refilter();
    }

    pub fn set_date_start(&mut self, start: Option<NaiveDate>) {
        self.filters.date_range.start = start;
        self.refilter();
    }

    pub fn set_date_end(&mut self, end: Option<NaiveDate>) {
        self.filters.date_range.end = end;
        self.refilter();
    }

    /// Write the current view to `path` (`.xlsx` or `.csv`).
    pub fn export_view(&mut self, path: &Path) -> Result<(), ExportError> {
        match export_to_path(&self.view, path) {
            Ok(()) => {
                self.status_message = None;
                self.toast = Some(Toast::new(
                    format!("Tersimpan: {}", path.display()),
                    ToastKind::Info,
                ));
                Ok(())
            }
            Err(e) => {
                log::error!("Export to {} failed: {e}", path.display());
                self.status_message = Some(format!("Gagal mengekspor: {e}"));
                Err(e)
            }
        }
    }

    /// Drop the toast once it has been on screen long enough.
    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}
