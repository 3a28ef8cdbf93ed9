use super::data::{
    normalize_language, path_display, AuthenticateMode, ConfigurationStore, Profile,
    ProfileValidationError,
};
use super::io::ConfigError;
use super::printing::profile_to_json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn ak_profile(name: &str) -> Profile {
    Profile {
        name: name.to_string(),
        mode: Some(AuthenticateMode::AK),
        access_key_id: "LTAI5tExampleKeyId".to_string(),
        access_key_secret: "ExampleSecret".to_string(),
        region_id: "cn-hangzhou".to_string(),
        output_format: "json".to_string(),
        language: "en".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let store = ConfigurationStore::load_from_path(&config_path).expect("Failed to load config");

    assert!(store.profiles.is_empty());
    assert_eq!(store.current_profile, "default");
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("test_config.toml");

    // Phase 1: Initial save and load
    let mut store = ConfigurationStore::default();
    store.put_profile(ak_profile("default"));
    store
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let loaded = ConfigurationStore::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, store);

    // Phase 2: Modify and verify persistence of changes
    let mut store = loaded;
    let mut ecs = Profile::new("ecs");
    ecs.mode = Some(AuthenticateMode::EcsRamRole);
    ecs.ram_role_name = "worker-role".to_string();
    store.put_profile(ecs.clone());
    store.set_current_profile("ecs");
    store
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let loaded = ConfigurationStore::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded.current_profile, "ecs");
    assert_eq!(loaded.get_profile("ecs"), Some(&ecs));

    // Phase 3: Removal is not additive on disk
    let mut store = loaded;
    store.remove_profile("default");
    store
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let loaded = ConfigurationStore::load_from_path(&config_path).expect("Failed to load config");
    assert!(loaded.get_profile("default").is_none());
    assert_eq!(loaded.profiles.len(), 1);
}

#[test]
fn save_creates_missing_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("a").join("b").join("config.toml");

    ConfigurationStore::default()
        .save_to_path(&config_path)
        .expect("Failed to save config");
    assert!(config_path.exists());
}

#[test]
fn saved_file_uses_readable_toml_layout() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let mut store = ConfigurationStore::default();
    let mut role = ak_profile("role");
    role.mode = Some(AuthenticateMode::RamRoleArn);
    role.expired_seconds = 900;
    store.put_profile(role);
    store.save_to_path(&config_path).expect("save");

    let contents = fs::read_to_string(&config_path).expect("read back");
    assert!(contents.contains("current_profile = \"default\""));
    assert!(contents.contains("[[profiles]]"));
    assert!(contents.contains("mode = \"RamRoleArn\""));
    assert!(contents.contains("expired_seconds = 900"));
}

#[test]
fn profile_without_mode_omits_it_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let mut store = ConfigurationStore::default();
    store.put_profile(Profile::new("blank"));
    store.save_to_path(&config_path).expect("save");

    let contents = fs::read_to_string(&config_path).expect("read back");
    assert!(!contents.contains("mode ="));
    let loaded = ConfigurationStore::load_from_path(&config_path).expect("load");
    assert_eq!(loaded.get_profile("blank").and_then(|p| p.mode), None);
}

#[test]
fn load_fills_missing_fields_with_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[[profiles]]\nname = \"minimal\"\nmode = \"AK\"\naccess_key_id = \"id\"\n",
    )
    .expect("write config");

    let store = ConfigurationStore::load_from_path(&config_path).expect("load");
    assert_eq!(store.current_profile, "default");
    let profile = store.get_profile("minimal").expect("profile present");
    assert_eq!(profile.access_key_id, "id");
    assert_eq!(profile.access_key_secret, "");
    assert_eq!(profile.expired_seconds, 0);
}

#[test]
fn load_rejects_malformed_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "current_profile = [unterminated").expect("write config");

    let err = ConfigurationStore::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.is_load_error());
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn load_rejects_unknown_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[[profiles]]\nname = \"x\"\nmode = \"Password\"\n")
        .expect("write config");

    let err = ConfigurationStore::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_reports_unreadable_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    // A directory exists at the path but cannot be read as a file.
    let err = ConfigurationStore::load_from_path(temp_dir.path()).expect_err("should fail");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn save_reports_unwritable_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, "file").expect("write blocker");
    let config_path = blocker.join("config.toml");

    let err = ConfigurationStore::default()
        .save_to_path(&config_path)
        .expect_err("should fail");
    assert!(matches!(err, ConfigError::Write { .. }));
    assert!(!err.is_load_error());
}

#[test]
fn put_then_get_round_trips() {
    let mut store = ConfigurationStore::default();
    let profile = ak_profile("prod");
    store.put_profile(profile.clone());
    assert_eq!(store.get_profile("prod"), Some(&profile));
}

#[test]
fn put_overwrites_by_name() {
    let mut store = ConfigurationStore::default();
    store.put_profile(ak_profile("prod"));
    let mut updated = ak_profile("prod");
    updated.region_id = "us-west-1".to_string();
    store.put_profile(updated.clone());

    assert_eq!(store.profiles.len(), 1);
    assert_eq!(store.get_profile("prod"), Some(&updated));
}

#[test]
fn get_profile_is_exact_match() {
    let mut store = ConfigurationStore::default();
    store.put_profile(ak_profile("Prod"));
    assert!(store.get_profile("prod").is_none());
    assert!(store.get_profile("Pro").is_none());
}

#[test]
fn new_profile_is_blank_and_not_inserted() {
    let store = ConfigurationStore::default();
    let profile = store.new_profile("fresh");
    assert_eq!(profile, Profile::new("fresh"));
    assert_eq!(profile.mode, None);
    assert!(store.get_profile("fresh").is_none());
}

#[test]
fn removing_last_profile_resets_current_to_default() {
    let mut store = ConfigurationStore::default();
    store.put_profile(ak_profile("only"));
    store.set_current_profile("only");
    store.remove_profile("only").expect("removed");
    assert_eq!(store.current_profile, "default");
    assert!(store.current_profile().is_none());
}

#[test]
fn mode_parsing_is_case_sensitive() {
    for mode in AuthenticateMode::ALL {
        assert_eq!(mode.as_str().parse::<AuthenticateMode>(), Ok(mode));
    }
    assert!("ak".parse::<AuthenticateMode>().is_err());
    assert!("stsToken".parse::<AuthenticateMode>().is_err());
    assert!("".parse::<AuthenticateMode>().is_err());
}

#[test]
fn session_expiry_modes() {
    assert!(AuthenticateMode::RamRoleArn.uses_session_expiry());
    assert!(AuthenticateMode::RsaKeyPair.uses_session_expiry());
    assert!(!AuthenticateMode::AK.uses_session_expiry());
    assert!(!AuthenticateMode::StsToken.uses_session_expiry());
    assert!(!AuthenticateMode::EcsRamRole.uses_session_expiry());
}

#[test]
fn normalize_language_accepts_only_zh_and_en() {
    assert_eq!(normalize_language("zh"), "zh");
    assert_eq!(normalize_language("en"), "en");
    assert_eq!(normalize_language(""), "en");
    assert_eq!(normalize_language("zh-CN"), "en");
}

#[test]
fn validation_checks_mode_requirements() {
    assert!(ak_profile("ok").validate().is_ok());
    assert_eq!(
        Profile::new("none").validate(),
        Err(ProfileValidationError::MissingMode)
    );

    let mut sts = ak_profile("sts");
    sts.mode = Some(AuthenticateMode::StsToken);
    assert_eq!(
        sts.validate(),
        Err(ProfileValidationError::MissingField {
            mode: AuthenticateMode::StsToken,
            field: "sts_token",
        })
    );

    let mut ecs = Profile::new("ecs");
    ecs.mode = Some(AuthenticateMode::EcsRamRole);
    assert!(!ecs.is_valid());
    ecs.ram_role_name = "role".to_string();
    assert!(ecs.is_valid());

    let mut rsa = Profile::new("rsa");
    rsa.mode = Some(AuthenticateMode::RsaKeyPair);
    rsa.private_key = "key".to_string();
    assert_eq!(
        rsa.validate(),
        Err(ProfileValidationError::MissingField {
            mode: AuthenticateMode::RsaKeyPair,
            field: "key_pair_name",
        })
    );
}

#[test]
fn credential_summary_hides_key_material() {
    let profile = ak_profile("prod");
    assert_eq!(profile.credential_summary(), "AK:***yId");

    let mut short = ak_profile("short");
    short.mode = Some(AuthenticateMode::StsToken);
    short.access_key_id = "ab".to_string();
    assert_eq!(short.credential_summary(), "StsToken:*****");

    let mut ecs = Profile::new("ecs");
    ecs.mode = Some(AuthenticateMode::EcsRamRole);
    ecs.ram_role_name = "worker".to_string();
    assert_eq!(ecs.credential_summary(), "EcsRamRole:worker");

    assert_eq!(Profile::new("blank").credential_summary(), "(unset)");
}

#[test]
fn profile_table_marks_current_profile() {
    let mut store = ConfigurationStore::default();
    store.put_profile(ak_profile("default"));
    store.put_profile(Profile::new("draft"));

    let mut out = Vec::new();
    store.write_profile_table(&mut out).expect("write table");
    let table = String::from_utf8(out).expect("utf-8");

    let default_row = table
        .lines()
        .find(|line| line.starts_with("default *"))
        .expect("current row");
    assert!(default_row.contains("Valid"));
    assert!(default_row.contains("cn-hangzhou"));
    assert!(!default_row.contains("ExampleSecret"));

    let draft_row = table
        .lines()
        .find(|line| line.starts_with("draft "))
        .expect("draft row");
    assert!(draft_row.contains("Invalid"));
}

#[test]
fn profile_json_uses_field_names() {
    let json = profile_to_json(&ak_profile("prod")).expect("serialize");
    assert!(json.contains("\"name\": \"prod\""));
    assert!(json.contains("\"mode\": \"AK\""));
    assert!(json.contains("\"output_format\": \"json\""));
}

#[test]
fn test_path_display() {
    let path = PathBuf::from("/tmp/cloudcfg/config.toml");
    assert!(path_display(&path).ends_with("config.toml"));
}
