use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Default client-side route of the login page.
pub const LOGIN_ROUTE: &str = "/login";

/// Client-side routing as seen by the HTTP layer: it can read the current
/// route and replace it, nothing else.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;
    fn replace_route(&self, target: &str);
}

/// In-process [`Navigator`] that keeps the route in memory and records
/// every replacement.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    route: Mutex<String>,
    replaced: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            route: Mutex::new(initial_route.into()),
            replaced: Mutex::new(Vec::new()),
        }
    }

    /// Every target passed to `replace_route`, oldest first.
    pub fn replaced_routes(&self) -> Vec<String> {
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_route(&self) -> String {
        self.route
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_route(&self, target: &str) {
        *self.route.lock().unwrap_or_else(PoisonError::into_inner) = target.to_string();
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.to_string());
    }
}

/// What to do when the backend reports an expired session: send the user
/// to the login route, remembering where they were in a `next` parameter.
///
/// The "already on the login route" check is not atomic. Several 401s
/// landing before the first redirect is observed may each redirect.
#[derive(Clone)]
pub struct SessionExpiryPolicy {
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl SessionExpiryPolicy {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            login_route: LOGIN_ROUTE.to_string(),
        }
    }

    #[must_use]
    pub fn with_login_route(mut self, login_route: impl Into<String>) -> Self {
        self.login_route = login_route.into();
        self
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Redirects to the login route unless the user is already there.
    /// Returns whether a redirect was issued.
    pub fn on_session_expired(&self) -> bool {
        let current = self.navigator.current_route();
        if self.targets_login(&current) {
            tracing::debug!(route = %current, "session expired on login route; not redirecting");
            return false;
        }
        let target = self.redirect_target(&current);
        tracing::info!(from = %current, to = %target, "session expired; redirecting to login");
        self.navigator.replace_route(&target);
        true
    }

    fn targets_login(&self, route: &str) -> bool {
        let path = route.split(['?', '#']).next().unwrap_or_default();
        path == self.login_route
    }

    fn redirect_target(&self, current: &str) -> String {
        // Keep slashes readable; everything else that could break the query
        // string is escaped.
        let next = urlencoding::encode(current).replace("%2F", "/");
        format!("{}?next={next}", self.login_route)
    }
}

impl std::fmt::Debug for SessionExpiryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionExpiryPolicy")
            .field("login_route", &self.login_route)
            .finish_non_exhaustive()
    }
}
