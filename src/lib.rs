//! Personal environment setup.
//!
//! Two independent tools share one binary:
//!
//! - **[`link`]**: symlink dotfiles (bash rc files, git config, prompt
//!   script, starship theme, xonsh config) from a dotfiles repository into
//!   the home directory, driven by the file groups in [`config`]
//! - **[`import_time`]**: measure how long importing a Python module takes
//!   on first and subsequent imports, through the
//!   [`ModuleRegistry`](import_time::ModuleRegistry) seam
//!
//! [`resources`] holds the `check + apply` symlink primitive and
//! [`commands`] wires both tools to the CLI.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod import_time;
pub mod link;
pub mod logging;
pub mod platform;
pub mod resources;
