//! The interactive `configure` workflow and its non-interactive siblings.
//!
//! [`configure_profile`] loads the store, prompts for the fields the chosen
//! authenticate mode needs plus the common ones, then saves. The `*_in_store`
//! functions do the same work on an already loaded store so callers control
//! when anything touches disk.

pub mod collector;
pub mod error;
pub mod workflow;

pub use collector::{ModeCollector, ModeSelection};
pub use error::ConfigureError;
pub use workflow::{
    configure_in_store, configure_profile, delete_in_store, get_from_store, set_in_store,
    target_profile_name, ProfileUpdate,
};
