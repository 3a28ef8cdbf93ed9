use super::collector::{ModeCollector, ModeSelection};
use super::error::ConfigureError;
use crate::core::config::data::{
    normalize_language, ConfigurationStore, Profile, OUTPUT_FORMAT_JSON,
    ROLE_SESSION_EXPIRED_SECONDS,
};
use crate::utils::input::TokenSource;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve which profile an operation targets: the explicit name when given,
/// otherwise the store's current profile.
pub fn target_profile_name(store: &ConfigurationStore, requested: Option<&str>) -> String {
    requested
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| store.current_profile.clone())
}

/// Interactively configure one profile inside `store`, then upsert it and
/// make it current. Nothing is written to disk.
pub fn configure_in_store<S: TokenSource, W: Write>(
    store: &mut ConfigurationStore,
    profile_name: Option<&str>,
    mode: Option<&str>,
    input: &mut S,
    out: &mut W,
) -> Result<Profile, ConfigureError> {
    let selection = ModeSelection::parse(mode)?;
    let name = target_profile_name(store, profile_name);
    let existing = store.get_or_new_profile(&name);

    writeln!(
        out,
        "Configuring profile '{name}' in '{}' authenticate mode...",
        selection.collected_mode()
    )?;

    let profile = ModeCollector::new(input, out).collect(&existing, selection)?;

    store.put_profile(profile.clone());
    store.set_current_profile(name);
    Ok(profile)
}

/// Load the store at `config_path`, run the interactive pass and save.
///
/// A failure before the save leaves the file untouched.
pub fn configure_profile<S: TokenSource, W: Write>(
    config_path: &Path,
    profile_name: Option<&str>,
    mode: Option<&str>,
    input: &mut S,
    out: &mut W,
) -> Result<Profile, ConfigureError> {
    let mut store =
        ConfigurationStore::load_from_path(config_path).map_err(ConfigureError::ConfigLoad)?;

    let profile = configure_in_store(&mut store, profile_name, mode, input, out)?;

    write!(out, "Saving profile[{}] ...", profile.name)?;
    out.flush()?;
    store
        .save_to_path(config_path)
        .map_err(ConfigureError::ConfigSave)?;
    writeln!(out, "Done.")?;
    info!(profile = %profile.name, "profile configured");
    Ok(profile)
}

/// Field values supplied on the command line for a non-interactive update.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub mode: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub sts_token: Option<String>,
    pub ram_role_arn: Option<String>,
    pub role_session_name: Option<String>,
    pub ram_role_name: Option<String>,
    pub private_key_file: Option<PathBuf>,
    pub key_pair_name: Option<String>,
    pub region_id: Option<String>,
    pub language: Option<String>,
}

impl ProfileUpdate {
    fn apply_to(self, profile: &mut Profile) -> Result<(), ConfigureError> {
        if let Some(raw) = self.mode {
            match ModeSelection::parse(Some(raw.as_str()))? {
                ModeSelection::Explicit(mode) => profile.mode = Some(mode),
                ModeSelection::Implicit => {}
            }
        }

        let assignments = [
            (self.access_key_id, &mut profile.access_key_id),
            (self.access_key_secret, &mut profile.access_key_secret),
            (self.sts_token, &mut profile.sts_token),
            (self.ram_role_arn, &mut profile.ram_role_arn),
            (self.role_session_name, &mut profile.role_session_name),
            (self.ram_role_name, &mut profile.ram_role_name),
            (self.key_pair_name, &mut profile.key_pair_name),
            (self.region_id, &mut profile.region_id),
            (self.language, &mut profile.language),
        ];
        for (value, slot) in assignments {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }

        if let Some(path) = self.private_key_file {
            profile.private_key = fs::read_to_string(&path)
                .map_err(|source| ConfigureError::FileRead { path, source })?;
        }
        Ok(())
    }
}

/// Apply `update` to the named profile (created when absent), normalize it,
/// validate it and make it current.
///
/// The store is left unchanged when any step fails.
pub fn set_in_store(
    store: &mut ConfigurationStore,
    profile_name: Option<&str>,
    update: ProfileUpdate,
) -> Result<Profile, ConfigureError> {
    let name = target_profile_name(store, profile_name);
    let mut profile = store.get_or_new_profile(&name);

    update.apply_to(&mut profile)?;
    profile.output_format = OUTPUT_FORMAT_JSON.to_string();
    profile.language = normalize_language(&profile.language);
    if profile.mode.is_some_and(|mode| mode.uses_session_expiry()) {
        profile.expired_seconds = ROLE_SESSION_EXPIRED_SECONDS;
    }
    profile.validate().map_err(ConfigureError::InvalidProfile)?;

    store.put_profile(profile.clone());
    store.set_current_profile(name);
    Ok(profile)
}

/// Remove the named profile. If it was current, the selection moves on.
pub fn delete_in_store(
    store: &mut ConfigurationStore,
    profile_name: &str,
) -> Result<Profile, ConfigureError> {
    store
        .remove_profile(profile_name)
        .ok_or_else(|| ConfigureError::ProfileNotFound(profile_name.to_string()))
}

/// Look up a profile for display, defaulting to the current one.
pub fn get_from_store<'a>(
    store: &'a ConfigurationStore,
    profile_name: Option<&str>,
) -> Result<&'a Profile, ConfigureError> {
    let name = target_profile_name(store, profile_name);
    store
        .get_profile(&name)
        .ok_or(ConfigureError::ProfileNotFound(name))
}
