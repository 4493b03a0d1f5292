//! Shared test harness modules for the Kindred CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(clippy::expect_used, reason = "tests fail fast on broken fixtures")]

use super::*;

mod export_unit;
mod helpers;
mod rank_unit;
