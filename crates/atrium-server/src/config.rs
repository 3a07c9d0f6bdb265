//! Runtime configuration, deserialised from `config.toml` and `ATRIUM_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use atrium_api::AuthConfig;
use atrium_core::rate_limit::{
  CONTACT_FORM_KEY, CONTACT_FORM_MAX_ATTEMPTS, CONTACT_FORM_WINDOW, RateLimitPolicy,
};
use atrium_store_rest::RestConfig;
use serde::Deserialize;

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_max_attempts() -> usize { CONTACT_FORM_MAX_ATTEMPTS }

fn default_window_ms() -> u64 { CONTACT_FORM_WINDOW.as_millis() as u64 }

fn default_sweep_secs() -> u64 { 60 }

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                    String,
  #[serde(default = "default_port")]
  pub port:                    u16,
  /// Hosted database URL. Needs `store_credential` as well.
  #[serde(default)]
  pub store_endpoint:          Option<String>,
  #[serde(default)]
  pub store_credential:        Option<String>,
  /// Local SQLite file; takes precedence over the hosted store when set.
  #[serde(default)]
  pub sqlite_path:             Option<PathBuf>,
  #[serde(default)]
  pub admin_username:          Option<String>,
  /// argon2 PHC string, see `--hash-password`.
  #[serde(default)]
  pub admin_password_hash:     Option<String>,
  #[serde(default = "default_max_attempts")]
  pub rate_limit_max_attempts: usize,
  #[serde(default = "default_window_ms")]
  pub rate_limit_window_ms:    u64,
  /// Seconds between limiter sweeps. `0` disables the sweeper.
  #[serde(default = "default_sweep_secs")]
  pub sweep_interval_secs:     u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                    default_host(),
      port:                    default_port(),
      store_endpoint:          None,
      store_credential:        None,
      sqlite_path:             None,
      admin_username:          None,
      admin_password_hash:     None,
      rate_limit_max_attempts: default_max_attempts(),
      rate_limit_window_ms:    default_window_ms(),
      sweep_interval_secs:     default_sweep_secs(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn rate_limit_policy(&self) -> RateLimitPolicy {
    RateLimitPolicy {
      key:          CONTACT_FORM_KEY.to_owned(),
      max_attempts: self.rate_limit_max_attempts,
      window:       Duration::from_millis(self.rate_limit_window_ms),
    }
  }

  pub fn sweep_interval(&self) -> Option<Duration> {
    (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
  }

  /// Admin credentials, if both the username and the hash are set.
  pub fn auth(&self) -> Option<AuthConfig> {
    let username = self.admin_username.clone().filter(|s| !s.is_empty())?;
    let password_hash = self.admin_password_hash.clone().filter(|s| !s.is_empty())?;
    Some(AuthConfig {
      username,
      password_hash,
    })
  }

  pub fn rest_config(&self) -> Option<RestConfig> {
    RestConfig::from_parts(self.store_endpoint.clone(), self.store_credential.clone())
  }

  /// `sqlite_path` with a leading `~` expanded.
  pub fn sqlite_path(&self) -> Option<PathBuf> {
    self.sqlite_path.as_deref().map(expand_tilde)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
