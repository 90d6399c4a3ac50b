use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Route names servable without a session: the login page, the login
/// submission endpoint and the static asset routes. Everything else is
/// protected.
static PUBLIC_ROUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["login", "check_login", "stylesheet", "javascript"]
        .into_iter()
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Classify a route by name and build the canonical URL for a named route.
/// Classification is total over all route names: anything not explicitly
/// public is protected.
pub trait RouteClassifier: Send + Sync {
    fn classify(&self, route_name: &str) -> Access;
    fn url_for(&self, route_name: &str) -> Option<String>;
}

/// Named-route registry mapping stable route names to their URL paths.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    paths: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, path: &str) -> &mut Self {
        self.paths.insert(name.to_string(), path.to_string());
        self
    }

    /// Reverse lookup used at dispatch time: resolve a matched path back to
    /// its route name. Unknown paths have no name and classify as protected.
    pub fn name_for(&self, path: &str) -> Option<&str> {
        self.paths
            .iter()
            .find(|(_, p)| p.as_str() == path)
            .map(|(n, _)| n.as_str())
    }
}

impl RouteClassifier for RouteTable {
    fn classify(&self, route_name: &str) -> Access {
        if PUBLIC_ROUTES.contains(route_name) {
            Access::Public
        } else {
            Access::Protected
        }
    }

    fn url_for(&self, route_name: &str) -> Option<String> {
        self.paths.get(route_name).cloned()
    }
}
