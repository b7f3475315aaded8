//! Module configuration tree.

use super::Resolver;
use crate::env::{is_truthy, ScopedEnv};
use crate::error::Result;
use crate::overrides::ConfigKind;
use crate::tree::{Tree, Value};
use crate::url::ConnectionUrl;

const MAILGUN_DEFAULT_SCHEME: &str = "https";
const MAILGUN_DEFAULT_HOST: &str = "api.mailgun.net";
const MAILGUN_PLACEHOLDER_KEY: &str = "key-1234567890abcdefghijklmnopqrstu";

const SOLR_DEFAULT_SERVER: &str = "default";
const SOLR_DEFAULT_PORT: u16 = 8983;

fn indicator(name: &str, fg_color: &str, bg_color: &str) -> Tree {
    [("name", name), ("fg_color", fg_color), ("bg_color", bg_color)]
        .into_iter()
        .collect()
}

impl Resolver {
    /// Builds the module configuration tree, overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment name is missing or an override
    /// layer fails. Malformed mail or search URLs only drop their block.
    pub fn config(&self) -> Result<Tree> {
        let env_name = self.environment_name()?;
        let env = self.scoped();

        let mut config = Tree::new();
        let shield_enable = env.get("SHIELD").map_or(true, |v| is_truthy(&v));
        config.set_path(&["shield.settings", "shield_enable"], shield_enable);

        match env_name.as_str() {
            "dev" => {
                config.set_path(&["shield.settings", "shield_enable"], false);
                config.set_path(&["config_split.config_split.local", "status"], true);
                config.insert(
                    "environment_indicator.indicator",
                    indicator("Development", "#110011", "#33aa33"),
                );
                config.set_path(&["system.logging", "error_level"], "verbose");
                let mut performance = Tree::new();
                performance.set_path(&["css", "preprocess"], false);
                performance.set_path(&["js", "preprocess"], false);
                config.insert("system.performance", performance);
            }
            "staging" => {
                config.insert(
                    "environment_indicator.indicator",
                    indicator("Staging", "#ffe0b6", "#a15c00"),
                );
            }
            "prod" | "production" => {
                config.insert(
                    "environment_indicator.indicator",
                    indicator("Production", "#ffb6b6", "#870000"),
                );
            }
            _ => {}
        }

        if let Some(url) = optional_url(&env, "MAILGUN_URL") {
            let endpoint = format!(
                "{}://{}",
                url.scheme.as_deref().unwrap_or(MAILGUN_DEFAULT_SCHEME),
                url.host.as_deref().unwrap_or(MAILGUN_DEFAULT_HOST)
            );
            let mailgun = config.map_entry("mailgun.settings");
            mailgun.insert("api_endpoint", endpoint);
            mailgun.insert(
                "api_key",
                url.user.unwrap_or_else(|| MAILGUN_PLACEHOLDER_KEY.to_string()),
            );
        }

        let enabled = config
            .get_path(&["shield.settings", "shield_enable"])
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if enabled {
            apply_shield_credentials(&env, config.map_entry("shield.settings"));
        }

        if let Some(url) = optional_url(&env, "SOLR_URL") {
            let server = format!(
                "search_api.server.{}",
                url.fragment.as_deref().unwrap_or(SOLR_DEFAULT_SERVER)
            );
            let mut connector = Tree::new();
            connector.insert("scheme", url.scheme.unwrap_or_else(|| "http".into()));
            connector.insert("host", url.host.unwrap_or_else(|| "localhost".into()));
            connector.insert("port", url.port.unwrap_or(SOLR_DEFAULT_PORT));
            connector.insert("path", url.path.unwrap_or_else(|| "/".into()));
            connector.insert("core", url.user.unwrap_or_else(|| "default".into()));
            config.set_path(&[server.as_str(), "backend_config", "connector_config"], connector);
        }

        self.apply_overrides(&mut config, ConfigKind::Config)?;
        Ok(config)
    }
}

/// Basic-auth credentials. The `SHIELD` value stands in for a missing user
/// name or password.
fn apply_shield_credentials(env: &ScopedEnv<'_>, shield: &mut Tree) {
    let shared = env.get("SHIELD");

    if let Some(user) = env.get("SHIELD_USERNAME").or_else(|| shared.clone()) {
        shield.set_path(&["credentials", "shield", "user"], user);
    }
    if let Some(pass) = env.get("SHIELD_PASSWORD").or(shared) {
        shield.set_path(&["credentials", "shield", "pass"], pass);
    }
    if let Some(message) = env.get("SHIELD_MESSAGE") {
        shield.insert("print", message);
    }
}

fn optional_url(env: &ScopedEnv<'_>, key: &str) -> Option<ConnectionUrl> {
    let raw = env.get(key)?;
    match ConnectionUrl::parse(&raw) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Ignoring {key}: {e}");
            None
        }
    }
}
