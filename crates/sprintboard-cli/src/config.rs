use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sprintboard_core::ClientConfig;
use tracing::{debug, info};

use crate::cli::Cli;

pub const CONFIG_ENV: &str = "SPRINTBOARD_CONFIG";
pub const API_URL_ENV: &str = "SPRINTBOARD_API_URL";

/// File, then environment, then flags.
#[tracing::instrument(skip(cli))]
pub fn resolve(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let path = resolve_config_path(
        cli.config.as_deref(),
        std::env::var_os(CONFIG_ENV),
        dirs::config_dir(),
    );
    let mut config = match path {
        Some(path) => load_file(&path)?,
        None => {
            debug!("no config file; using defaults");
            ClientConfig::default()
        }
    };

    let mut overrides = Vec::new();
    if let Ok(url) = std::env::var(API_URL_ENV) {
        overrides.push(("api_base_url".to_string(), url));
    }
    if let Some(url) = &cli.api_url {
        overrides.push(("api_base_url".to_string(), url.clone()));
    }
    overrides.extend(
        cli.overrides
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone())),
    );
    config
        .apply_overrides(overrides)
        .context("invalid configuration override")?;

    Ok(config)
}

#[tracing::instrument]
pub fn load_file(path: &Path) -> anyhow::Result<ClientConfig> {
    info!(config = %path.display(), "loading config");
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ClientConfig::from_toml_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Explicit flag, then the env variable,
/// then `<config dir>/sprintboard/config.toml`
/// when it exists.
pub fn resolve_config_path(
    flag: Option<&Path>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }
    config_dir
        .map(|dir| dir.join("sprintboard").join("config.toml"))
        .filter(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use sprintboard_core::calendar::DateKeying;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn flag_wins_over_env_and_config_dir() {
        let chosen = resolve_config_path(
            Some(Path::new("/tmp/flag.toml")),
            Some(OsString::from("/tmp/env.toml")),
            None,
        );
        assert_eq!(chosen, Some(PathBuf::from("/tmp/flag.toml")));

        let chosen = resolve_config_path(None, Some(OsString::from("/tmp/env.toml")), None);
        assert_eq!(chosen, Some(PathBuf::from("/tmp/env.toml")));
    }

    #[test]
    fn config_dir_file_is_used_only_when_present() {
        let temp = tempdir().expect("tempdir");
        assert_eq!(
            resolve_config_path(None, None, Some(temp.path().to_path_buf())),
            None
        );

        let dir = temp.path().join("sprintboard");
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("config.toml"), "").expect("write config");
        assert_eq!(
            resolve_config_path(None, None, Some(temp.path().to_path_buf())),
            Some(dir.join("config.toml"))
        );
    }

    #[test]
    fn load_file_reads_toml() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"http://api.test/api/\"\n\
             date_keys = \"utc\"\n",
        )
        .expect("write config");

        let config = load_file(&path).expect("load");
        assert_eq!(config.api_base_url, "http://api.test/api");
        assert_eq!(config.date_keys, DateKeying::Utc);
    }

    #[test]
    fn broken_file_names_the_path() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "api_base_url = [").expect("write");

        let err = load_file(&path).expect_err("invalid toml");
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
