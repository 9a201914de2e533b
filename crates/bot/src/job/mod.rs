//! Job module — long-running background tasks.

pub mod report;

pub use report::{periodic_report, report_tick, TickOutcome};
