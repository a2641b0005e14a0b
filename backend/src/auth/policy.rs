//! Route authorization policy table.
//!
//! Each route is listed with the access it requires: open to everyone,
//! any authenticated user, or a permission grant matching the route's
//! (path pattern, method) pair. The table is consulted by the `authorize`
//! middleware; routes not listed default to requiring authentication.

/// Access level required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// A valid access token is enough.
    Authenticated,
    /// A valid access token whose permission snapshot contains this
    /// route's (path, method) pair. The ADMIN role bypasses the check.
    Permission,
}

/// One row of the policy table.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    pub method: &'static str,
    pub path: &'static str,
    pub access: Access,
}

const fn route(method: &'static str, path: &'static str, access: Access) -> RoutePolicy {
    RoutePolicy {
        method,
        path,
        access,
    }
}

/// Ordered route policy table; first match wins.
#[derive(Debug)]
pub struct PolicyTable {
    entries: Vec<RoutePolicy>,
}

impl PolicyTable {
    pub fn new() -> Self {
        use Access::*;

        Self {
            entries: vec![
                route("GET", "/", Public),
                // Auth flow: login/register/refresh are reachable without a
                // token; logout and account need an authenticated identity.
                route("POST", "/auth/login", Public),
                route("POST", "/auth/register", Public),
                route("GET", "/auth/refresh", Public),
                route("POST", "/auth/logout", Authenticated),
                route("GET", "/auth/account", Authenticated),
                // Job board browsing is open.
                route("GET", "/api/companies", Public),
                route("GET", "/api/companies/{id}", Public),
                route("GET", "/api/jobs", Public),
                route("GET", "/api/jobs/{id}", Public),
                // Applicants manage their own submissions and subscriptions.
                route("POST", "/api/resumes", Authenticated),
                route("POST", "/api/resumes/by-user", Authenticated),
                route("POST", "/api/subscribers", Authenticated),
                route("PATCH", "/api/subscribers", Authenticated),
                route("GET", "/api/subscribers/skills", Authenticated),
                // Everything below is gated on a permission grant.
                route("POST", "/api/users", Permission),
                route("GET", "/api/users", Permission),
                route("GET", "/api/users/{id}", Permission),
                route("PATCH", "/api/users/{id}", Permission),
                route("DELETE", "/api/users/{id}", Permission),
                route("POST", "/api/roles", Permission),
                route("GET", "/api/roles", Permission),
                route("GET", "/api/roles/{id}", Permission),
                route("PATCH", "/api/roles/{id}", Permission),
                route("DELETE", "/api/roles/{id}", Permission),
                route("POST", "/api/permissions", Permission),
                route("GET", "/api/permissions", Permission),
                route("GET", "/api/permissions/{id}", Permission),
                route("PATCH", "/api/permissions/{id}", Permission),
                route("DELETE", "/api/permissions/{id}", Permission),
                route("POST", "/api/companies", Permission),
                route("PATCH", "/api/companies/{id}", Permission),
                route("DELETE", "/api/companies/{id}", Permission),
                route("POST", "/api/jobs", Permission),
                route("PATCH", "/api/jobs/{id}", Permission),
                route("DELETE", "/api/jobs/{id}", Permission),
                route("GET", "/api/resumes", Permission),
                route("GET", "/api/resumes/{id}", Permission),
                route("PATCH", "/api/resumes/{id}", Permission),
                route("DELETE", "/api/resumes/{id}", Permission),
                route("GET", "/api/subscribers", Permission),
                route("GET", "/api/subscribers/{id}", Permission),
                route("DELETE", "/api/subscribers/{id}", Permission),
            ],
        }
    }

    /// Finds the first entry matching the request's method and path.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&RoutePolicy> {
        self.entries
            .iter()
            .find(|e| e.method == method && path_matches(e.path, path))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches a concrete request path against an axum-style pattern where
/// `{param}` segments act as single-segment wildcards.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let is_param = expected.starts_with('{') && expected.ends_with('}');
                if !is_param && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matching() {
        assert!(path_matches("/api/jobs", "/api/jobs"));
        assert!(path_matches("/api/jobs/{id}", "/api/jobs/42"));
        assert!(path_matches("/api/jobs/{id}", "/api/jobs/0190a1b2"));

        assert!(!path_matches("/api/jobs/{id}", "/api/jobs"));
        assert!(!path_matches("/api/jobs", "/api/jobs/42"));
        assert!(!path_matches("/api/jobs/{id}", "/api/companies/42"));
        assert!(!path_matches("/api/jobs/{id}", "/api/jobs/42/extra"));
    }

    #[test]
    fn test_lookup_resolves_access_levels() {
        let table = PolicyTable::new();

        let login = table.lookup("POST", "/auth/login").unwrap();
        assert_eq!(login.access, Access::Public);

        let account = table.lookup("GET", "/auth/account").unwrap();
        assert_eq!(account.access, Access::Authenticated);

        let delete_user = table.lookup("DELETE", "/api/users/42").unwrap();
        assert_eq!(delete_user.access, Access::Permission);
        assert_eq!(delete_user.path, "/api/users/{id}");

        // Unlisted routes resolve to no entry; the middleware then
        // requires plain authentication.
        assert!(table.lookup("PUT", "/api/users/42").is_none());
    }

    #[test]
    fn test_method_distinguishes_entries() {
        let table = PolicyTable::new();

        assert_eq!(
            table.lookup("GET", "/api/companies").unwrap().access,
            Access::Public
        );
        assert_eq!(
            table.lookup("POST", "/api/companies").unwrap().access,
            Access::Permission
        );
    }
}
