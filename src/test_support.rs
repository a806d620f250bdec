/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/test_support.rs
*
* Shared helpers for the unit tests.
*
* SPDX-License-Identifier: Apache-2.0
*/

use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Filtered by `RUST_LOG`,
/// quiet by default. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
