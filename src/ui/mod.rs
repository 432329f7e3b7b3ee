//! egui rendering. Every function here reads [`crate::state::AppState`] and
//! calls back into it for mutations; none of them hold state of their own.

pub mod charts;
pub mod kpi;
pub mod panels;
pub mod table;
pub mod toast;
