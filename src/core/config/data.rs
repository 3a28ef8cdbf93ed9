use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name used for the current profile when the store has never been configured.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// The only output format the remote API client understands.
pub const OUTPUT_FORMAT_JSON: &str = "json";

/// Credential lifetime applied to modes that exchange keys for a session.
pub const ROLE_SESSION_EXPIRED_SECONDS: u64 = 900;

pub const LANGUAGE_ZH: &str = "zh";
pub const LANGUAGE_EN: &str = "en";

/// Closed set of credential mechanisms a profile can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticateMode {
    AK,
    StsToken,
    RamRoleArn,
    EcsRamRole,
    RsaKeyPair,
}

impl AuthenticateMode {
    pub const ALL: [AuthenticateMode; 5] = [
        AuthenticateMode::AK,
        AuthenticateMode::StsToken,
        AuthenticateMode::RamRoleArn,
        AuthenticateMode::EcsRamRole,
        AuthenticateMode::RsaKeyPair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticateMode::AK => "AK",
            AuthenticateMode::StsToken => "StsToken",
            AuthenticateMode::RamRoleArn => "RamRoleArn",
            AuthenticateMode::EcsRamRole => "EcsRamRole",
            AuthenticateMode::RsaKeyPair => "RsaKeyPair",
        }
    }

    /// Modes that trade long-lived material for a session of fixed length.
    pub fn uses_session_expiry(&self) -> bool {
        matches!(
            self,
            AuthenticateMode::RamRoleArn | AuthenticateMode::RsaKeyPair
        )
    }
}

impl fmt::Display for AuthenticateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a mode string does not name one of the supported modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(pub String);

impl fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected authenticate mode: {}", self.0)
    }
}

impl std::error::Error for UnknownModeError {}

impl FromStr for AuthenticateMode {
    type Err = UnknownModeError;

    /// Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthenticateMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

/// One named credential configuration.
///
/// Only the fields relevant to `mode` carry meaning; the rest are kept as-is
/// so switching modes back and forth does not lose previously entered values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// Unset until the profile is configured with an explicit mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AuthenticateMode>,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub access_key_secret: String,
    #[serde(default)]
    pub sts_token: String,
    #[serde(default)]
    pub ram_role_arn: String,
    #[serde(default)]
    pub role_session_name: String,
    #[serde(default)]
    pub expired_seconds: u64,
    #[serde(default)]
    pub ram_role_name: String,
    /// Contents of the RSA private key file, not its path.
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub key_pair_name: String,
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub output_format: String,
    #[serde(default)]
    pub language: String,
}

/// Why a profile cannot be used to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// The profile was never given an authenticate mode.
    MissingMode,
    /// A field the mode depends on is empty.
    MissingField {
        mode: AuthenticateMode,
        field: &'static str,
    },
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileValidationError::MissingMode => write!(f, "authenticate mode is not set"),
            ProfileValidationError::MissingField { mode, field } => {
                write!(f, "{field} is required for {mode} mode")
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Field names paired with their values for every field `mode` requires.
    fn required_fields(&self, mode: AuthenticateMode) -> Vec<(&'static str, &str)> {
        let ak = [
            ("access_key_id", self.access_key_id.as_str()),
            ("access_key_secret", self.access_key_secret.as_str()),
        ];
        match mode {
            AuthenticateMode::AK => ak.to_vec(),
            AuthenticateMode::StsToken => {
                let mut fields = ak.to_vec();
                fields.push(("sts_token", self.sts_token.as_str()));
                fields
            }
            AuthenticateMode::RamRoleArn => {
                let mut fields = ak.to_vec();
                fields.push(("ram_role_arn", self.ram_role_arn.as_str()));
                fields.push(("role_session_name", self.role_session_name.as_str()));
                fields
            }
            AuthenticateMode::EcsRamRole => vec![("ram_role_name", self.ram_role_name.as_str())],
            AuthenticateMode::RsaKeyPair => vec![
                ("private_key", self.private_key.as_str()),
                ("key_pair_name", self.key_pair_name.as_str()),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let mode = self.mode.ok_or(ProfileValidationError::MissingMode)?;
        match self
            .required_fields(mode)
            .into_iter()
            .find(|(_, value)| value.is_empty())
        {
            Some((field, _)) => Err(ProfileValidationError::MissingField { mode, field }),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Coerce a language preference to one of the two supported values.
pub fn normalize_language(language: &str) -> String {
    match language {
        LANGUAGE_ZH | LANGUAGE_EN => language.to_string(),
        _ => LANGUAGE_EN.to_string(),
    }
}

/// The set of named profiles plus the name of the one currently selected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigurationStore {
    /// Weak reference by name; it may point at a profile that does not exist yet.
    #[serde(default = "default_profile_name")]
    pub current_profile: String,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

impl Default for ConfigurationStore {
    fn default() -> Self {
        Self {
            current_profile: default_profile_name(),
            profiles: Vec::new(),
        }
    }
}

impl ConfigurationStore {
    /// Exact-name lookup.
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// A blank profile carrying only `name`. It is not inserted.
    pub fn new_profile(&self, name: &str) -> Profile {
        Profile::new(name)
    }

    /// The stored profile named `name`, or a fresh one if there is none.
    pub fn get_or_new_profile(&self, name: &str) -> Profile {
        self.get_profile(name)
            .cloned()
            .unwrap_or_else(|| self.new_profile(name))
    }

    /// Insert, or overwrite the profile with the same name.
    pub fn put_profile(&mut self, profile: Profile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        let index = self.profiles.iter().position(|p| p.name == name)?;
        let removed = self.profiles.remove(index);
        if self.current_profile == name {
            self.current_profile = self
                .profiles
                .first()
                .map(|p| p.name.clone())
                .unwrap_or_else(default_profile_name);
        }
        Some(removed)
    }

    pub fn set_current_profile(&mut self, name: impl Into<String>) {
        self.current_profile = name.into();
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.get_profile(&self.current_profile)
    }

    pub fn list_profiles(&self) -> Vec<&Profile> {
        self.profiles.iter().collect()
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
