use anyhow::Result;
use skillrec_intelligence::OPTION_NAMES;
use std::path::PathBuf;

/// Prefix of every environment variable read by skillrec.
pub const ENV_PREFIX: &str = "SKILLREC_";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the config file named by `SKILLREC_CONFIG`, if set.
pub fn config_file_from_env() -> Option<PathBuf> {
    std::env::var("SKILLREC_CONFIG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns the default config file path (`~/.skillrec/config.toml`).
pub fn default_config_file() -> Option<PathBuf> {
    home_dir()
        .ok()
        .map(|h| h.join(".skillrec").join("config.toml"))
}

/// Returns the profile file named by `SKILLREC_PROFILES`, if set.
pub fn profiles_from_env() -> Option<PathBuf> {
    std::env::var("SKILLREC_PROFILES")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Environment variable that overrides `option`, e.g. `SKILLREC_USE_BINARY`.
pub fn env_var_name(option: &str) -> String {
    format!("{ENV_PREFIX}{}", option.to_uppercase())
}

/// Option overrides set through `SKILLREC_<OPTION>` variables, in
/// [`OPTION_NAMES`] order.
pub fn env_overrides() -> Vec<(String, String)> {
    OPTION_NAMES
        .iter()
        .filter_map(|option| {
            std::env::var(env_var_name(option))
                .ok()
                .map(|value| (option.to_string(), value))
        })
        .collect()
}
