#![doc(test(attr(deny(warnings))))]

//! Kakeibo keeps a household expense log against an editable two-level
//! category list, and ships an interactive shell on top of it.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Kakeibo tracing initialized.");
    });
}
