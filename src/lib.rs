//! cloudcfg manages named credential profiles for a remote cloud API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core::config`] owns the profile data model, the authenticate modes, and
//!   loading/saving the profile store.
//! - [`core::configure`] implements the interactive field-collection workflow
//!   and the non-interactive get/set/delete operations.
//! - [`utils`] provides secret masking and the line-based prompt reader.
//! - [`cli`] parses arguments and dispatches into [`core::configure`].
//!
//! The binary entrypoint (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod utils;
