pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod types;

pub(crate) use config::{
    ensure_secure_addr, handle_config_command, load_config, mask_token, resolve_api_base,
    resolve_settings, save_config,
};
pub(crate) use types::{CliConfig, CommandContext};
