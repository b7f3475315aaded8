//! Layered overrides for computed trees.
//!
//! After a tree is computed, up to four layers may patch it, in this order:
//!
//! 1. `{app}/sites/default/{kind}.{env}.yaml`
//! 2. `{app}/sites/default/{kind}.local.yaml`
//! 3. `{app}/sites/{site}/{kind}.{env}.yaml` (non-default sites only)
//! 4. `{app}/sites/{site}/{kind}.local.yaml` (non-default sites only)
//!
//! Each slot can be served by a YAML patch file, an in-process hook, or
//! both (file first). Missing layers are skipped.
//!
//! # Examples
//!
//! ```
//! use siteenv::overrides::{ConfigKind, LayerSlot, OverrideLayers};
//! use siteenv::tree::Tree;
//!
//! let mut layers = OverrideLayers::new("/nonexistent/app");
//! layers.register(ConfigKind::Settings, LayerSlot::DefaultLocal, |tree, ctx| {
//!     tree.insert("site", ctx.site_name);
//!     Ok(())
//! });
//!
//! let mut settings = Tree::new();
//! layers.apply(&mut settings, ConfigKind::Settings, "default", "dev").unwrap();
//! assert_eq!(settings.get("site").and_then(|v| v.as_str()), Some("default"));
//! ```

mod loader;

pub use loader::PatchLoader;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::topology::DEFAULT_SITE;
use crate::tree::{Tree, TreeMerger};

/// Which tree an override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    /// Application settings.
    Settings,
    /// Datastore connections.
    Databases,
    /// Module configuration.
    Config,
}

impl ConfigKind {
    /// File name stem for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Databases => "databases",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four override positions, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerSlot {
    /// `sites/default/{kind}.{env}.yaml`
    DefaultEnvironment,
    /// `sites/default/{kind}.local.yaml`
    DefaultLocal,
    /// `sites/{site}/{kind}.{env}.yaml`
    SiteEnvironment,
    /// `sites/{site}/{kind}.local.yaml`
    SiteLocal,
}

impl LayerSlot {
    /// All slots in application order.
    pub const ALL: [Self; 4] = [
        Self::DefaultEnvironment,
        Self::DefaultLocal,
        Self::SiteEnvironment,
        Self::SiteLocal,
    ];

    const fn is_site_specific(self) -> bool {
        matches!(self, Self::SiteEnvironment | Self::SiteLocal)
    }

    fn path(self, app_path: &Path, kind: ConfigKind, site_name: &str, env_name: &str) -> PathBuf {
        let dir = if self.is_site_specific() {
            site_name
        } else {
            DEFAULT_SITE
        };
        let suffix = match self {
            Self::DefaultEnvironment | Self::SiteEnvironment => env_name,
            Self::DefaultLocal | Self::SiteLocal => "local",
        };
        app_path
            .join("sites")
            .join(dir)
            .join(format!("{kind}.{suffix}.yaml"))
    }
}

/// What an override hook is told about the layer it runs in.
#[derive(Debug, Clone, Copy)]
pub struct OverrideContext<'a> {
    /// The application root.
    pub app_path: &'a Path,
    /// The active site.
    pub site_name: &'a str,
    /// The active environment name.
    pub environment_name: &'a str,
    /// The tree being patched.
    pub kind: ConfigKind,
    /// The slot the hook is bound to.
    pub slot: LayerSlot,
}

/// An in-process override layer.
pub type OverrideHook = Box<dyn Fn(&mut Tree, &OverrideContext<'_>) -> Result<()> + Send + Sync>;

/// Applies override layers to computed trees.
pub struct OverrideLayers {
    app_path: PathBuf,
    hooks: Vec<(ConfigKind, LayerSlot, OverrideHook)>,
}

impl fmt::Debug for OverrideLayers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideLayers")
            .field("app_path", &self.app_path)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl OverrideLayers {
    /// Creates an engine rooted at the application path.
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            hooks: Vec::new(),
        }
    }

    /// Binds a hook to a slot. Several hooks on one slot run in registration
    /// order.
    pub fn register<F>(&mut self, kind: ConfigKind, slot: LayerSlot, hook: F)
    where
        F: Fn(&mut Tree, &OverrideContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.register_boxed(kind, slot, Box::new(hook));
    }

    /// Binds an already boxed hook to a slot.
    pub fn register_boxed(&mut self, kind: ConfigKind, slot: LayerSlot, hook: OverrideHook) {
        self.hooks.push((kind, slot, hook));
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// The slots that apply for a site, with their file paths.
    #[must_use]
    pub fn layer_paths(
        &self,
        kind: ConfigKind,
        site_name: &str,
        environment_name: &str,
    ) -> Vec<(LayerSlot, PathBuf)> {
        LayerSlot::ALL
            .into_iter()
            .filter(|slot| !slot.is_site_specific() || site_name != DEFAULT_SITE)
            .map(|slot| {
                (
                    slot,
                    slot.path(&self.app_path, kind, site_name, environment_name),
                )
            })
            .collect()
    }

    /// Applies every existing layer to `tree` in order.
    ///
    /// # Errors
    ///
    /// Returns the first error from reading a patch file or running a hook.
    pub fn apply(
        &self,
        tree: &mut Tree,
        kind: ConfigKind,
        site_name: &str,
        environment_name: &str,
    ) -> Result<()> {
        for (slot, path) in self.layer_paths(kind, site_name, environment_name) {
            if path.exists() {
                log::debug!("Applying {kind} override {}", path.display());
                let patch = PatchLoader::load_file(&path)?;
                TreeMerger::merge_into(tree, &patch);
            }

            let context = OverrideContext {
                app_path: &self.app_path,
                site_name,
                environment_name,
                kind,
                slot,
            };
            for (_, _, hook) in self
                .hooks
                .iter()
                .filter(|(k, s, _)| *k == kind && *s == slot)
            {
                log::debug!("Running {kind} override hook for {slot:?}");
                hook(tree, &context)?;
            }
        }
        Ok(())
    }
}
