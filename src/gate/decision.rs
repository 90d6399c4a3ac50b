use std::sync::Arc;

use tracing::{info, warn};

use super::context::Identity;
use super::routes::{Access, RouteClassifier};
use super::session::{Session, SessionStore};

/// Terminal gate outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass the request to downstream handlers, carrying identity facts when
    /// a session resolved.
    Forward(Option<Identity>),
    /// Stop here and send a 302 to the given location.
    Redirect(String),
}

/// Per-request authentication gate. Constructed once with its store and
/// classifier capabilities and shared across requests; it holds no mutable
/// state of its own.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    routes: Arc<dyn RouteClassifier>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>, routes: Arc<dyn RouteClassifier>) -> Self {
        Self { store, routes }
    }

    /// Resolve the cookie token, if any, against the store. A store failure
    /// is logged and then indistinguishable from a missing record.
    async fn resolve(&self, token: Option<&str>) -> Option<Session> {
        let token = token?;
        match self.store.lookup_by_token(token).await {
            Ok(found) => found,
            Err(e) => {
                warn!("session lookup failed: {e}");
                None
            }
        }
    }

    /// Decide forward-or-redirect for one request. The lookup always
    /// completes before the route branch is taken, and nothing here mutates
    /// state: the decision is a function of (token, lookup result, route
    /// name).
    ///
    /// `route_name` is the name the router tagged the request with; unnamed
    /// requests are treated as protected.
    pub async fn decide(&self, token: Option<&str>, route_name: Option<&str>) -> Decision {
        match self.resolve(token).await {
            Some(session) => {
                info!(user_id = session.user_id, "session resolved");
                Decision::Forward(Some(Identity {
                    user_id: session.user_id,
                    is_authenticated: true,
                }))
            }
            None => {
                info!("session not found");
                let access = route_name
                    .map(|n| self.routes.classify(n))
                    .unwrap_or(Access::Protected);
                match access {
                    Access::Public => Decision::Forward(None),
                    Access::Protected => {
                        let login = self
                            .routes
                            .url_for("login")
                            .unwrap_or_else(|| "/login".to_string());
                        Decision::Redirect(login)
                    }
                }
            }
        }
    }
}
