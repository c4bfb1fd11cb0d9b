// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! githelper library
//!
//! This module exports the command-line configuration, the tool handlers and
//! the subcommand dispatch for use in integration tests and as a library.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod logging;
