//! Application settings tree.

use super::Resolver;
use crate::error::Result;
use crate::overrides::ConfigKind;
use crate::tree::{Tree, Value};

const NULL_CACHE_BACKEND: &str = "cache.backend.null";

impl Resolver {
    /// Builds the settings tree, overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment name is missing or an override
    /// layer fails.
    pub fn settings(&self) -> Result<Tree> {
        let env_name = self.environment_name()?;
        let env = self.scoped();

        let mut settings = Tree::new();
        settings.insert("update_free_access", false);
        settings.insert(
            "file_scan_ignore_directories",
            vec!["node_modules", "bower_components"],
        );
        settings.insert("entity_update_batch_size", 50);
        settings.insert("entity_update_backup", true);
        settings.insert("migrate_node_migrate_type_classic", false);
        settings.insert("config_sync_directory", self.config_sync_path());
        settings.insert("file_public_path", self.public_file_path());
        settings.insert("file_private_path", self.private_file_path());
        settings.insert("file_temp_path", self.temporary_file_path());
        if let Some(hash_salt) = env.get("HASH_SALT") {
            settings.insert("hash_salt", hash_salt);
        }
        settings.insert("trusted_host_patterns", self.trusted_host_patterns());

        let app_path = self.app_path().display();
        if env_name.is_dev() {
            settings.insert(
                "container_yamls",
                vec![format!("{app_path}/sites/development.services.yml")],
            );
            let bins: Tree = ["render", "page", "dynamic_page_cache"]
                .into_iter()
                .map(|bin| (bin, Value::from(NULL_CACHE_BACKEND)))
                .collect();
            settings.map_entry("cache").insert("bins", bins);
            settings.insert("hash_salt", "foo");
            settings.insert("rebuild_access", false);
            settings.insert("skip_permissions_hardening", true);
            settings.insert("update_free_access", false);
        } else {
            settings.insert(
                "container_yamls",
                vec![format!("{app_path}/sites/{env_name}.services.yml")],
            );
        }

        self.apply_overrides(&mut settings, ConfigKind::Settings)?;
        Ok(settings)
    }
}
