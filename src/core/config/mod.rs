pub mod data;
pub mod io;
pub mod printing;

pub use data::{
    normalize_language, AuthenticateMode, ConfigurationStore, Profile, ProfileValidationError,
};
pub use io::ConfigError;

#[cfg(test)]
pub mod tests;
