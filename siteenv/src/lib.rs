#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # siteenv
//!
//! A library for resolving multi-site deployment configuration from
//! environment variables and layered override files.
//!
//! One codebase may serve several tenant sites across several domains. This
//! library turns the environment of such a deployment into three trees the
//! host application consumes at bootstrap: settings, database connections
//! and module configuration.
//!
//! ## Core Types
//!
//! - [`Resolver`] and [`ResolverBuilder`]: per-site resolution
//! - [`Topology`] and [`SiteMap`]: the domains × sites cross product
//! - [`TrustedHosts`]: anchored host patterns and Host header matching
//! - [`ConnectionUrl`]: connection-string parsing
//! - [`Tree`] and [`Value`]: ordered configuration trees
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use siteenv::env::Environment;
//! use siteenv::Resolver;
//!
//! let resolver = Resolver::builder()
//!     .with_site_name("site1")
//!     .with_environment(Environment::from_pairs([
//!         ("APP_ENV", "prod"),
//!         ("SITES", "site1,site2,site3"),
//!         ("DATABASE_URL", "mysql://user:password@db/"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! assert!(resolver.is_multi_site());
//! assert_eq!(resolver.database_name().unwrap(), "site1");
//! assert_eq!(
//!     resolver.trusted_host_patterns(),
//!     vec![
//!         r"^site1\.default\.example$",
//!         r"^site2\.default\.example$",
//!         r"^site3\.default\.example$",
//!     ]
//! );
//! ```

pub mod database;
pub mod env;
pub mod error;
pub mod logging;
pub mod overrides;
pub mod resolver;
pub mod topology;
pub mod tree;
pub mod trusted_hosts;
pub mod url;
pub mod validator;

// Re-export key types at crate root for convenience
pub use database::DatabaseConnection;
pub use env::Environment;
pub use error::{Error, ExecutionContext, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use overrides::{ConfigKind, LayerSlot, OverrideContext};
pub use resolver::{EnvironmentName, ResolvedConfig, Resolver, ResolverBuilder};
pub use topology::{SiteMap, Topology};
pub use tree::{Tree, Value};
pub use trusted_hosts::TrustedHosts;
pub use url::ConnectionUrl;
pub use validator::TreeValidator;
