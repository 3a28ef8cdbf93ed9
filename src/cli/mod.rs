//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::printing::profile_to_json;
use crate::core::config::ConfigurationStore;
use crate::core::configure::{
    configure_profile, delete_in_store, get_from_store, set_in_store, target_profile_name,
    ConfigureError, ProfileUpdate,
};
use crate::logging::init_tracing;
use crate::utils::input::InputReader;

#[derive(Parser)]
#[command(name = "cloudcfg")]
#[command(about = "Create, inspect and store credential profiles for the cloud API")]
#[command(
    long_about = "cloudcfg manages named credential profiles for the cloud API. Each profile \
uses one authenticate mode and remembers a default region and language.\n\n\
Authenticate modes:\n\
  AK                Access key id and secret\n\
  StsToken          Access key plus a short-lived security token\n\
  RamRoleArn        Assume a RAM role with an access key\n\
  EcsRamRole        Use the role attached to the ECS instance\n\
  RsaKeyPair        Sign with an RSA private key file and key pair name\n\n\
Examples:\n\
  cloudcfg configure --profile prod --mode AK\n\
  cloudcfg configure list\n\
  cloudcfg configure get --profile prod"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the profile store (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure credentials and settings for a profile
    Configure(ConfigureArgs),
}

#[derive(clap::Args)]
pub struct ConfigureArgs {
    #[command(subcommand)]
    pub action: Option<ConfigureAction>,

    /// Profile to operate on (defaults to the current profile)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Authenticate mode: AK, StsToken, RamRoleArn, EcsRamRole or RsaKeyPair
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigureAction {
    /// Print a profile as JSON
    Get,
    /// Update profile fields without prompting
    Set(SetArgs),
    /// List all profiles
    List,
    /// Delete a profile
    Delete,
}

#[derive(clap::Args)]
pub struct SetArgs {
    /// Authenticate mode: AK, StsToken, RamRoleArn, EcsRamRole or RsaKeyPair
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,
    #[arg(long)]
    pub access_key_id: Option<String>,
    #[arg(long)]
    pub access_key_secret: Option<String>,
    #[arg(long)]
    pub sts_token: Option<String>,
    #[arg(long)]
    pub ram_role_arn: Option<String>,
    #[arg(long)]
    pub role_session_name: Option<String>,
    #[arg(long)]
    pub ram_role_name: Option<String>,
    /// Path of the RSA private key; its contents are stored in the profile
    #[arg(long, value_name = "PATH")]
    pub private_key_file: Option<PathBuf>,
    #[arg(long)]
    pub key_pair_name: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    /// Language for messages: zh or en
    #[arg(long)]
    pub language: Option<String>,
}

impl From<SetArgs> for ProfileUpdate {
    fn from(args: SetArgs) -> Self {
        ProfileUpdate {
            mode: args.mode,
            access_key_id: args.access_key_id,
            access_key_secret: args.access_key_secret,
            sts_token: args.sts_token,
            ram_role_arn: args.ram_role_arn,
            role_session_name: args.role_session_name,
            ram_role_name: args.ram_role_name,
            private_key_file: args.private_key_file,
            key_pair_name: args.key_pair_name,
            region_id: args.region,
            language: args.language,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config_path = match args.config {
        Some(path) => path,
        None => ConfigurationStore::default_config_path()?,
    };

    match args.command {
        Commands::Configure(configure) => {
            if let Err(e) = run_configure(configure, config_path) {
                eprintln!("❌ Configuration failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn load_store(config_path: &Path) -> Result<ConfigurationStore, ConfigureError> {
    ConfigurationStore::load_from_path(config_path).map_err(ConfigureError::ConfigLoad)
}

fn save_store(store: &ConfigurationStore, config_path: &Path) -> Result<(), ConfigureError> {
    store
        .save_to_path(config_path)
        .map_err(ConfigureError::ConfigSave)
}

fn run_configure(args: ConfigureArgs, config_path: PathBuf) -> Result<(), ConfigureError> {
    let profile = args.profile.as_deref();
    match args.action {
        None => {
            let mut input = InputReader::stdin();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            configure_profile(&config_path, profile, args.mode.as_deref(), &mut input, &mut out)?;
        }
        Some(ConfigureAction::Get) => {
            let store = load_store(&config_path)?;
            let found = get_from_store(&store, profile)?;
            let json = profile_to_json(found)
                .map_err(|err| ConfigureError::Input(err.into()))?;
            println!("{json}");
        }
        Some(ConfigureAction::Set(set_args)) => {
            let mut store = load_store(&config_path)?;
            let updated = set_in_store(&mut store, profile, set_args.into())?;
            save_store(&store, &config_path)?;
            println!("✅ Saved profile '{}'", updated.name);
        }
        Some(ConfigureAction::List) => {
            let store = load_store(&config_path)?;
            store.print_profiles()?;
        }
        Some(ConfigureAction::Delete) => {
            let mut store = load_store(&config_path)?;
            let name = target_profile_name(&store, profile);
            delete_in_store(&mut store, &name)?;
            save_store(&store, &config_path)?;
            println!("✅ Deleted profile '{name}'");
        }
    }
    Ok(())
}
