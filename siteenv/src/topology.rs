//! Multi-site topology.
//!
//! A deployment serves every declared site name on every declared domain.
//! The [`SiteMap`] is the cross product of the two lists, keyed by the
//! fully-qualified host (`site.domain`, or the bare domain for the
//! `default` site).

use indexmap::IndexMap;
use serde::Serialize;

use crate::env::ScopedEnv;

/// The site name used when none is selected.
pub const DEFAULT_SITE: &str = "default";

/// The placeholder domain used when `DOMAINS` is not set.
pub const DEFAULT_DOMAIN: &str = "default.example";

/// Builds the fully-qualified key for a site on a domain.
///
/// # Examples
///
/// ```
/// use siteenv::topology::site_key;
///
/// assert_eq!(site_key("default", "example.com"), "example.com");
/// assert_eq!(site_key("shop", "example.com"), "shop.example.com");
/// ```
#[must_use]
pub fn site_key(site_name: &str, domain: &str) -> String {
    if site_name == DEFAULT_SITE {
        domain.to_string()
    } else {
        format!("{site_name}.{domain}")
    }
}

/// Ordered mapping from site key to bare site name.
///
/// Iteration follows site names in the outer loop and domains in the inner
/// loop.
///
/// # Examples
///
/// ```
/// use siteenv::SiteMap;
///
/// let sites = SiteMap::build(
///     &["default".to_string(), "shop".to_string()],
///     &["a.example".to_string(), "b.example".to_string()],
/// );
/// let keys: Vec<_> = sites.iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, ["a.example", "b.example", "shop.a.example", "shop.b.example"]);
/// assert!(sites.is_multi_site());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SiteMap {
    entries: IndexMap<String, String>,
}

impl SiteMap {
    /// Cross-products site names and domains.
    #[must_use]
    pub fn build(site_names: &[String], domains: &[String]) -> Self {
        let mut map = Self::default();
        for site_name in site_names {
            for domain in domains {
                map.entries
                    .insert(site_key(site_name, domain), site_name.clone());
            }
        }
        map
    }

    /// Number of site keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether more than one site key is served.
    #[must_use]
    pub fn is_multi_site(&self) -> bool {
        self.entries.len() > 1
    }

    /// The bare site name for a site key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterates over `(site key, site name)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Domains and site names declared for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    domains: Vec<String>,
    site_names: Vec<String>,
    sites: SiteMap,
}

impl Topology {
    /// Builds a topology from explicit lists.
    ///
    /// Empty lists fall back to the single placeholder domain and the
    /// `default` site.
    #[must_use]
    pub fn new(site_names: Vec<String>, domains: Vec<String>) -> Self {
        let site_names = if site_names.is_empty() {
            vec![DEFAULT_SITE.to_string()]
        } else {
            site_names
        };
        let domains = if domains.is_empty() {
            vec![DEFAULT_DOMAIN.to_string()]
        } else {
            domains
        };
        let sites = SiteMap::build(&site_names, &domains);
        Self {
            domains,
            site_names,
            sites,
        }
    }

    /// Reads `SITES` and `DOMAINS` from the environment.
    #[must_use]
    pub fn from_env(env: &ScopedEnv<'_>) -> Self {
        let topology = Self::new(
            env.get_list("SITES").unwrap_or_default(),
            env.get_list("DOMAINS").unwrap_or_default(),
        );
        log::debug!(
            "Resolved {} site key(s) from {} site name(s) and {} domain(s)",
            topology.sites.len(),
            topology.site_names.len(),
            topology.domains.len()
        );
        topology
    }

    /// The declared domains.
    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// The declared site names.
    #[must_use]
    pub fn site_names(&self) -> &[String] {
        &self.site_names
    }

    /// The site map.
    #[must_use]
    pub const fn sites(&self) -> &SiteMap {
        &self.sites
    }

    /// Whether more than one site key is served.
    #[must_use]
    pub fn is_multi_site(&self) -> bool {
        self.sites.is_multi_site()
    }
}


// Property-based tests for the site cross product
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn distinct(max: usize, pattern: &'static str) -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set(pattern, 1..=max).prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        // The site map has one entry per (site, domain) pair
        #[test]
        fn prop_site_count_is_product(
            sites in distinct(5, "[a-z]{1,6}"),
            domains in distinct(4, "[a-z]{1,6}\\.(com|org|test)"),
        ) {
            let map = SiteMap::build(&sites, &domains);
            prop_assert_eq!(map.len(), sites.len() * domains.len());
            prop_assert_eq!(map.is_multi_site(), sites.len() * domains.len() > 1);
        }

        // Keys are the bare domain for "default" and site.domain otherwise
        #[test]
        fn prop_keys_well_formed(
            sites in distinct(4, "[a-z]{1,6}"),
            domains in distinct(3, "[a-z]{1,6}\\.test"),
        ) {
            let map = SiteMap::build(&sites, &domains);
            for (key, site) in map.iter() {
                if site == DEFAULT_SITE {
                    prop_assert!(domains.iter().any(|d| d == key));
                } else {
                    let domain = key.strip_prefix(&format!("{site}.")).unwrap();
                    prop_assert!(domains.iter().any(|d| d == domain));
                }
            }
        }
    }
}
