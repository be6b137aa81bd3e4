//! CLI command handlers.

pub mod config;
pub mod install_url;
pub mod start;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sitedeck_config::{LoadedConfig, OAuthSection};
use sitedeck_oauth::OAuthConfig;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Load an explicit config file, or discover and merge the usual layers.
///
/// Loader warnings (plaintext secrets, unparseable layers) go to stderr.
pub fn load(config_path: Option<&Path>, ctx: &Context) -> Result<LoadedConfig> {
    let loaded = match config_path {
        Some(path) => LoadedConfig::from_file(path)?,
        None => sitedeck_config::load_config(None)?,
    };

    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    if ctx.verbose {
        let sources = loaded.loaded_from();
        if sources.is_empty() {
            eprintln!("No config files found, using defaults");
        } else {
            for source in sources {
                eprintln!("Loaded config: {}", source.display());
            }
        }
    }

    Ok(loaded)
}

/// Build the exchange configuration from a resolved `[oauth]` section.
pub fn oauth_config(section: &OAuthSection) -> OAuthConfig {
    OAuthConfig {
        client_id: section.client_id.clone().unwrap_or_default(),
        client_secret: section.client_secret.clone().unwrap_or_default(),
        authorize_url: section.authorize_url.clone(),
        token_url: section.token_url.clone(),
        redirect_uri: section.redirect_uri.clone(),
        scope: section.scope.clone(),
        timeout: Duration::from_secs(section.timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_config_from_section() {
        let section = OAuthSection {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            timeout_secs: 5,
            ..Default::default()
        };
        let config = oauth_config(&section);

        assert_eq!(config.client_id, "id");
        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_url, section.token_url);
    }
}
