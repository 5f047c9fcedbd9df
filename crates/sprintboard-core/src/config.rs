use std::time::Duration;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  warn
};

use crate::calendar::{
  DateKeying,
  Zone
};
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str =
  "http://localhost:8001/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client settings shared by the terminal
/// and browser front ends.
#[derive(
  Debug, Clone, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
  pub api_base_url:         String,
  /// IANA zone for "today" and `utc`
  /// keying; host zone when unset.
  pub timezone:             Option<String>,
  pub date_keys:            DateKeying,
  pub color:                bool,
  pub request_timeout_secs: u64
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base_url:         DEFAULT_API_BASE_URL
        .to_string(),
      timezone:             None,
      date_keys:            DateKeying::Local,
      color:                true,
      request_timeout_secs:
        DEFAULT_REQUEST_TIMEOUT_SECS
    }
  }
}

impl ClientConfig {
  pub fn from_toml_str(
    text: &str
  ) -> Result<Self, ConfigError> {
    let mut config: Self = toml::from_str(text)?;
    config.sanitize();
    config.zone()?;
    Ok(config)
  }

  pub fn sanitize(&mut self) {
    let trimmed = self
      .api_base_url
      .trim()
      .trim_end_matches('/')
      .to_string();
    self.api_base_url = if trimmed.is_empty() {
      warn!("empty api_base_url; using default");
      DEFAULT_API_BASE_URL.to_string()
    } else {
      trimmed
    };

    if self.request_timeout_secs == 0 {
      self.request_timeout_secs =
        DEFAULT_REQUEST_TIMEOUT_SECS;
    }

    if self
      .timezone
      .as_deref()
      .is_some_and(|tz| tz.trim().is_empty())
    {
      self.timezone = None;
    }
  }

  /// Applies `key=value` pairs from the
  /// command line or environment.
  #[tracing::instrument(skip(self, overrides))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> Result<(), ConfigError>
  where
    I: IntoIterator<Item = (String, String)>
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      match key.trim() {
        | "api_base_url" => {
          self.api_base_url = value;
        }
        | "timezone" => {
          Zone::parse(&value).ok_or_else(|| {
            invalid(&key, &value, "unknown timezone")
          })?;
          self.timezone = Some(value);
        }
        | "date_keys" => {
          self.date_keys = DateKeying::from_key(&value)
            .ok_or_else(|| {
              invalid(&key, &value, "expected local or utc")
            })?;
        }
        | "color" => {
          self.color = parse_bool(&value).ok_or_else(|| {
            invalid(&key, &value, "expected a boolean")
          })?;
        }
        | "request_timeout_secs" => {
          self.request_timeout_secs =
            value.trim().parse().map_err(|_| {
              invalid(&key, &value, "expected seconds")
            })?;
        }
        | _ => return Err(ConfigError::UnknownKey(key))
      }
    }
    self.sanitize();
    Ok(())
  }

  pub fn zone(&self) -> Result<Zone, ConfigError> {
    let raw = self.timezone.as_deref().unwrap_or("");
    Zone::parse(raw).ok_or_else(|| {
      invalid("timezone", raw, "unknown timezone")
    })
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

/// Splits `key=value`; `None` when there
/// is no `=`.
pub fn parse_override(
  raw: &str
) -> Option<(String, String)> {
  let (key, value) = raw.split_once('=')?;
  Some((key.trim().to_string(), value.trim().to_string()))
}

fn invalid(
  key: &str,
  value: &str,
  reason: &str
) -> ConfigError {
  ConfigError::Value {
    key:    key.to_string(),
    value:  value.to_string(),
    reason: reason.to_string()
  }
}

fn parse_bool(s: &str) -> Option<bool> {
  match s.trim().to_ascii_lowercase().as_str() {
    | "1" | "y" | "yes" | "on" | "true" => Some(true),
    | "0" | "n" | "no" | "off" | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let config =
      ClientConfig::from_toml_str("").expect("parse");
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.zone().expect("zone"), Zone::System);
  }

  #[test]
  fn file_values_are_sanitized() {
    let config = ClientConfig::from_toml_str(
      r#"
api_base_url = "http://example.test/api/"
timezone = "America/Sao_Paulo"
date_keys = "utc"
color = false
request_timeout_secs = 0
"#
    )
    .expect("parse");

    assert_eq!(config.api_base_url, "http://example.test/api");
    assert_eq!(config.date_keys, DateKeying::Utc);
    assert!(!config.color);
    assert_eq!(
      config.request_timeout_secs,
      DEFAULT_REQUEST_TIMEOUT_SECS
    );
    assert_eq!(
      config.zone().expect("zone").name(),
      "America/Sao_Paulo"
    );
  }

  #[test]
  fn unknown_file_key_is_rejected() {
    assert!(matches!(
      ClientConfig::from_toml_str("theme = \"dark\""),
      Err(ConfigError::Parse(_))
    ));
  }

  #[test]
  fn unknown_timezone_is_rejected() {
    assert!(matches!(
      ClientConfig::from_toml_str("timezone = \"Mars/Base\""),
      Err(ConfigError::Value { .. })
    ));
  }

  #[test]
  fn overrides_apply_and_validate() {
    let mut config = ClientConfig::default();
    config
      .apply_overrides([
        ("api_base_url".to_string(), "http://x/api/".to_string()),
        ("color".to_string(), "off".to_string()),
        ("date_keys".to_string(), "UTC".to_string()),
      ])
      .expect("valid overrides");
    assert_eq!(config.api_base_url, "http://x/api");
    assert!(!config.color);
    assert_eq!(config.date_keys, DateKeying::Utc);

    let err = config
      .apply_overrides([(
        "theme".to_string(),
        "dark".to_string()
      )])
      .expect_err("unknown key");
    assert!(matches!(err, ConfigError::UnknownKey(key) if key == "theme"));

    assert!(
      config
        .apply_overrides([(
          "request_timeout_secs".to_string(),
          "soon".to_string()
        )])
        .is_err()
    );
  }

  #[test]
  fn override_pairs_split_on_first_equals() {
    assert_eq!(
      parse_override("api_base_url=http://h/api?a=b"),
      Some((
        "api_base_url".to_string(),
        "http://h/api?a=b".to_string()
      ))
    );
    assert_eq!(parse_override("color"), None);
  }
}
