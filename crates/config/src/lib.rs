use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "rangeclub.toml",
    "config/rangeclub.toml",
    "crates/config/rangeclub.toml",
    "../rangeclub.toml",
    "../config/rangeclub.toml",
    "../crates/config/rangeclub.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub auth: AuthConfig,
    pub membership: MembershipConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
    #[serde(default)]
    pub bootstrap: BootstrapAdminConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 86_400,
            bootstrap: BootstrapAdminConfig::default(),
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }
}

/// Optional seed credentials for the first super admin. Without one there is
/// no way to reach the admin-only endpoints on a fresh process.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapAdminConfig {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    #[serde(default = "MembershipConfig::default_active_members_max")]
    pub active_members_max: usize,
    #[serde(default = "MembershipConfig::default_waitlist_max")]
    pub waitlist_max: usize,
    #[serde(default = "MembershipConfig::default_page_size")]
    pub default_page_size: usize,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            active_members_max: Self::default_active_members_max(),
            waitlist_max: Self::default_waitlist_max(),
            default_page_size: Self::default_page_size(),
        }
    }
}

impl MembershipConfig {
    const fn default_active_members_max() -> usize {
        200
    }

    const fn default_waitlist_max() -> usize {
        100
    }

    const fn default_page_size() -> usize {
        20
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use rangeclub_config::load;
///
/// std::env::remove_var("RANGECLUB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// assert_eq!(config.membership.active_members_max, 200);
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let session_ttl = defaults.auth.session_ttl_seconds;
    let session_ttl_i64 = if session_ttl > i64::MAX as u64 {
        i64::MAX
    } else {
        session_ttl as i64
    };

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("auth.session_ttl_seconds", session_ttl_i64)
        .unwrap()
        .set_default(
            "membership.active_members_max",
            defaults.membership.active_members_max as i64,
        )
        .unwrap()
        .set_default(
            "membership.waitlist_max",
            defaults.membership.waitlist_max as i64,
        )
        .unwrap()
        .set_default(
            "membership.default_page_size",
            defaults.membership.default_page_size as i64,
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("RANGECLUB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("RANGECLUB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via RANGECLUB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_membership_limits() {
        let config = AppConfig::default();
        assert_eq!(config.membership.active_members_max, 200);
        assert_eq!(config.membership.waitlist_max, 100);
        assert_eq!(config.membership.default_page_size, 20);
        assert_eq!(config.auth.session_ttl_seconds, 86_400);
    }

    #[test]
    fn bootstrap_admin_is_disabled_by_default() {
        let config = AppConfig::default();
        assert!(config.auth.bootstrap.admin_email.is_none());
        assert!(config.auth.bootstrap.admin_password.is_none());
    }
}
