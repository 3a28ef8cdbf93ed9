use crate::core::config::data::{AuthenticateMode, ConfigurationStore, Profile};
use crate::utils::mask::visible_suffix;
use std::io::{self, Write};

const KEY_SUFFIX_CHARS: usize = 3;

impl Profile {
    /// Short description of the credential in use, safe to print.
    pub fn credential_summary(&self) -> String {
        match self.mode {
            None => "(unset)".to_string(),
            Some(mode @ (AuthenticateMode::AK
            | AuthenticateMode::StsToken
            | AuthenticateMode::RamRoleArn)) => format!(
                "{mode}:***{}",
                visible_suffix(&self.access_key_id, KEY_SUFFIX_CHARS)
            ),
            Some(mode @ AuthenticateMode::EcsRamRole) => {
                format!("{mode}:{}", self.ram_role_name)
            }
            Some(mode @ AuthenticateMode::RsaKeyPair) => {
                format!("{mode}:{}", self.key_pair_name)
            }
        }
    }
}

impl ConfigurationStore {
    /// Write one row per profile; the current profile is marked with `*`.
    pub fn write_profile_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<20} | {:<28} | {:<7} | {:<16} | Language",
            "Profile", "Credential", "Valid", "Region"
        )?;
        writeln!(
            out,
            "{:-<20} | {:-<28} | {:-<7} | {:-<16} | {:-<8}",
            "", "", "", "", ""
        )?;
        for profile in &self.profiles {
            let name = if profile.name == self.current_profile {
                format!("{} *", profile.name)
            } else {
                profile.name.clone()
            };
            let valid = if profile.is_valid() { "Valid" } else { "Invalid" };
            writeln!(
                out,
                "{:<20} | {:<28} | {:<7} | {:<16} | {}",
                name,
                profile.credential_summary(),
                valid,
                profile.region_id,
                profile.language
            )?;
        }
        Ok(())
    }

    pub fn print_profiles(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_profile_table(&mut handle)
    }
}

/// Render a profile the way `get` shows it.
pub fn profile_to_json(profile: &Profile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(profile)
}
