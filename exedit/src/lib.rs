//! # exedit
//!
//! Command-line editor for ExplodeAny plugin configuration files.
//!
//! `exedit` drives [`explodeconf::ConfigManager`]: every command opens the
//! file, performs one operation and, for edits, saves it back using the
//! configured save policy.
//!
//! ## Modules
//!
//! - [`cli`] - Argument parsing and command dispatch
//! - [`render`] - Terminal output for groups, forms and values
//! - [`settings`] - Tool settings loaded from `exedit.toml`

/// Argument parsing and command dispatch.
pub mod cli;

/// Colored terminal output.
pub mod render;

/// Tool settings file.
pub mod settings;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
