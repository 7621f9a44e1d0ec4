use std::fs;
use std::path::{Path, PathBuf};

use groupme_core::{parse_group_ids, GroupId, Settings, DEFAULT_API_BASE};

use super::types::CliConfig;
use crate::cli_args::{ConfigArgs, ConfigCommand};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Set(args) => {
            if let Some(token) = args.token {
                let token = token.trim();
                if token.is_empty() {
                    anyhow::bail!("token must not be empty");
                }
                config.api_token = Some(token.to_string());
            }
            if let Some(groups) = args.groups {
                let ids = parse_group_ids(&groups);
                if ids.is_empty() {
                    anyhow::bail!("no group ids given");
                }
                config.group_ids = ids.into_iter().map(|id| id.to_string()).collect();
            }
            if let Some(api_base) = args.api_base {
                config.api_base = Some(api_base.trim_end_matches('/').to_string());
            }
            println!("Settings saved.");
        }
        ConfigCommand::Show => {
            let token = config
                .api_token
                .as_deref()
                .map(mask_token)
                .unwrap_or_else(|| "(not set)".to_string());
            let groups = if config.group_ids.is_empty() {
                "(none)".to_string()
            } else {
                config.group_ids.join(",")
            };
            let api_base = config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
            println!("api_token: {token}");
            println!("group_ids: {groups}");
            println!("api_base:  {api_base}");
        }
        ConfigCommand::Clear => {
            *config = CliConfig::default();
            println!("Settings cleared.");
        }
    }
    Ok(())
}

pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".groupme").join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Flags and environment win over the stored settings.
pub(crate) fn resolve_settings(
    token_arg: Option<String>,
    groups_arg: Option<String>,
    config: &CliConfig,
) -> Settings {
    let api_token = token_arg
        .or_else(|| config.api_token.clone())
        .unwrap_or_default();
    let group_ids = match groups_arg {
        Some(groups) => parse_group_ids(&groups),
        None => config
            .group_ids
            .iter()
            .map(|id| GroupId::from(id.as_str()))
            .collect(),
    };
    Settings::new(api_token, group_ids)
}

pub(crate) fn resolve_api_base(api_base_arg: Option<String>, config: &CliConfig) -> String {
    api_base_arg
        .or_else(|| config.api_base.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if addr.starts_with("http://") && !allow_insecure {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}
