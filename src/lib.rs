#![doc(test(attr(deny(warnings))))]

//! Outlay tracks personal expenses against monthly category budgets.
//!
//! The library exposes the HTTP API (`api`) and the terminal shell (`cli`);
//! both sit on top of `outlay-core` and the JSON storage crate.

pub mod api;
pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use errors::OutlayError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Outlay tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
