//! Field collection for a single profile.
//!
//! The collector walks `SelectMode -> CollectModeFields -> CollectCommonFields
//! -> Done` once, never backwards. Every answer goes into a private draft that
//! is only handed back when all steps succeed, so a failed pass leaves the
//! caller's profile exactly as it was.

use super::error::ConfigureError;
use crate::core::config::data::{
    normalize_language, AuthenticateMode, Profile, OUTPUT_FORMAT_JSON,
    ROLE_SESSION_EXPIRED_SECONDS,
};
use crate::utils::input::TokenSource;
use crate::utils::mask::mask_secret;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

const SECRET_VISIBLE_CHARS: usize = 3;

/// How the operator picked the mode.
///
/// An implicit pass collects access keys like `AK` but leaves the profile's
/// stored mode alone; only an explicit choice rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    Explicit(AuthenticateMode),
    Implicit,
}

impl ModeSelection {
    /// `None` and the empty string select the implicit default.
    pub fn parse(mode: Option<&str>) -> Result<Self, ConfigureError> {
        match mode {
            None | Some("") => Ok(ModeSelection::Implicit),
            Some(raw) => raw
                .parse()
                .map(ModeSelection::Explicit)
                .map_err(|_| ConfigureError::InvalidMode(raw.to_string())),
        }
    }

    /// The mode whose fields will be collected.
    pub fn collected_mode(&self) -> AuthenticateMode {
        match self {
            ModeSelection::Explicit(mode) => *mode,
            ModeSelection::Implicit => AuthenticateMode::AK,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, ModeSelection::Explicit(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectorState {
    SelectMode,
    CollectModeFields,
    CollectCommonFields,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Plain,
    Masked,
}

/// Prompts for the fields of one profile over a token source and a writer.
pub struct ModeCollector<'a, S, W> {
    input: &'a mut S,
    out: &'a mut W,
}

impl<'a, S: TokenSource, W: Write> ModeCollector<'a, S, W> {
    pub fn new(input: &'a mut S, out: &'a mut W) -> Self {
        Self { input, out }
    }

    /// Run a full pass over `profile` and return the updated copy.
    pub fn collect(
        &mut self,
        profile: &Profile,
        selection: ModeSelection,
    ) -> Result<Profile, ConfigureError> {
        let mut draft = profile.clone();
        let mut state = CollectorState::SelectMode;
        loop {
            state = match state {
                CollectorState::SelectMode => {
                    if let ModeSelection::Explicit(mode) = selection {
                        draft.mode = Some(mode);
                    }
                    debug!(
                        profile = %draft.name,
                        mode = %selection.collected_mode(),
                        explicit = selection.is_explicit(),
                        "selected authenticate mode"
                    );
                    CollectorState::CollectModeFields
                }
                CollectorState::CollectModeFields => {
                    self.collect_mode_fields(&mut draft, selection.collected_mode())?;
                    CollectorState::CollectCommonFields
                }
                CollectorState::CollectCommonFields => {
                    self.collect_common_fields(&mut draft)?;
                    CollectorState::Done
                }
                CollectorState::Done => return Ok(draft),
            };
        }
    }

    pub fn collect_mode_fields(
        &mut self,
        draft: &mut Profile,
        mode: AuthenticateMode,
    ) -> Result<(), ConfigureError> {
        debug!(profile = %draft.name, %mode, "collecting mode fields");
        match mode {
            AuthenticateMode::AK => self.collect_access_key(draft),
            AuthenticateMode::StsToken => {
                self.collect_access_key(draft)?;
                self.collect_field(draft, "Sts Token", Visibility::Masked, |p| {
                    &mut p.sts_token
                })
            }
            AuthenticateMode::RamRoleArn => {
                self.collect_access_key(draft)?;
                self.collect_field(draft, "Ram Role Arn", Visibility::Plain, |p| {
                    &mut p.ram_role_arn
                })?;
                self.collect_field(draft, "Role Session Name", Visibility::Plain, |p| {
                    &mut p.role_session_name
                })?;
                draft.expired_seconds = ROLE_SESSION_EXPIRED_SECONDS;
                Ok(())
            }
            AuthenticateMode::EcsRamRole => {
                self.collect_field(draft, "Ecs Ram Role", Visibility::Plain, |p| {
                    &mut p.ram_role_name
                })
            }
            AuthenticateMode::RsaKeyPair => {
                self.collect_private_key(draft)?;
                self.collect_field(draft, "Rsa Key Pair Name", Visibility::Plain, |p| {
                    &mut p.key_pair_name
                })?;
                draft.expired_seconds = ROLE_SESSION_EXPIRED_SECONDS;
                Ok(())
            }
        }
    }

    /// Region, output format and language, the same for every mode.
    pub fn collect_common_fields(&mut self, draft: &mut Profile) -> Result<(), ConfigureError> {
        self.collect_field(draft, "Default Region Id", Visibility::Plain, |p| {
            &mut p.region_id
        })?;

        let shown = draft.output_format.clone();
        self.prompt("Default Output Format (only json is supported)", &shown, "")?;
        draft.output_format = OUTPUT_FORMAT_JSON.to_string();

        self.collect_field(draft, "Default Language (zh|en)", Visibility::Plain, |p| {
            &mut p.language
        })?;
        draft.language = normalize_language(&draft.language);
        Ok(())
    }

    fn collect_access_key(&mut self, draft: &mut Profile) -> Result<(), ConfigureError> {
        self.collect_field(draft, "Access Key Id", Visibility::Masked, |p| {
            &mut p.access_key_id
        })?;
        self.collect_field(draft, "Access Key Secret", Visibility::Masked, |p| {
            &mut p.access_key_secret
        })
    }

    /// Ask for a key file and load its contents.
    ///
    /// An empty answer keeps an already loaded key; with nothing loaded the
    /// empty path is attempted and reported as unreadable.
    fn collect_private_key(&mut self, draft: &mut Profile) -> Result<(), ConfigureError> {
        let key_file = self.prompt("Rsa Private Key File", "", "")?;
        if key_file.is_empty() && !draft.private_key.is_empty() {
            return Ok(());
        }

        let path = PathBuf::from(key_file);
        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigureError::FileRead {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "loaded private key file");
        draft.private_key = contents;
        Ok(())
    }

    /// Prompt with the field's current value and replace it unless the answer is empty.
    fn collect_field<F>(
        &mut self,
        draft: &mut Profile,
        label: &str,
        visibility: Visibility,
        field: F,
    ) -> Result<(), ConfigureError>
    where
        F: Fn(&mut Profile) -> &mut String,
    {
        let current = field(&mut *draft).clone();
        let shown = match visibility {
            Visibility::Plain => current.clone(),
            Visibility::Masked => mask_secret(&current, SECRET_VISIBLE_CHARS),
        };
        let answer = self.prompt(label, &shown, &current)?;
        *field(draft) = answer;
        Ok(())
    }

    fn prompt(&mut self, label: &str, shown: &str, default: &str) -> Result<String, ConfigureError> {
        write!(self.out, "{label} [{shown}]: ")?;
        self.out.flush()?;
        Ok(self.input.read_token(default)?)
    }
}
