use sprintboard_core::ClientConfig;

use crate::storage;

const WEB_CONFIG_TOML: &str =
  include_str!("../assets/web.toml");

/// Bundled settings, then the per-browser
/// API URL override.
pub fn load_config() -> ClientConfig {
  let mut config =
    match ClientConfig::from_toml_str(
      WEB_CONFIG_TOML
    ) {
      | Ok(config) => config,
      | Err(error) => {
        tracing::error!(
          %error,
          "invalid bundled web.toml; using defaults"
        );
        ClientConfig::default()
      }
    };

  if let Some(url) = storage::load_api_base_url()
    && let Err(error) = config.apply_overrides([(
      "api_base_url".to_string(),
      url
    )])
  {
    tracing::warn!(
      %error,
      "ignoring stored api_base_url override"
    );
  }

  tracing::info!(
    api_base_url = %config.api_base_url,
    date_keys = config.date_keys.as_key(),
    "web config loaded"
  );
  config
}
