#![doc(test(attr(deny(warnings))))]

//! Ledger Stats aggregates a principal's categorised transactions into
//! per-category sums, share-of-group percentages and monthly series.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod stats;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Stats tracing initialized.");
    });
}
