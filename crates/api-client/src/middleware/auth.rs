//! Credential injection and global 401 handling

use crate::transport::ApiRequest;
use masakin_core::route::{Navigator, Route};
use masakin_core::session::SessionStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Path fragment identifying the login endpoint
pub const LOGIN_PATH: &str = "/auth/login";

/// What the interceptor did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Response handed to the caller unchanged
    Pass,
    /// Session was cleared and the user sent to `/login`
    SessionTerminated,
}

/// Attaches the bearer token and terminates the session on 401
///
/// A 401 from any path except the login endpoint clears the stored session
/// and hard-redirects to `/login`. A 401 from login itself is a plain
/// failed attempt and passes through.
#[derive(Clone)]
pub struct AuthInterceptor {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    /// Interceptor over the shared session
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// The session this interceptor reads and clears
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Add `Authorization: Bearer` when a token is held
    pub fn before_request(&self, request: &mut ApiRequest) {
        request.bearer = self.session.token();
    }

    /// Inspect a response status before it reaches the caller
    pub fn after_response(&self, request: &ApiRequest, status: u16) -> Interception {
        if status != 401 || request.path.contains(LOGIN_PATH) {
            return Interception::Pass;
        }

        warn!(
            request_id = %request.request_id,
            path = %request.path,
            "Unauthorized response, ending session"
        );
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "Failed to clear stored session");
        }
        self.navigator.hard_redirect(Route::Login);
        debug!("Redirected to {}", Route::Login);
        Interception::SessionTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masakin_core::session::UserSummary;
    use masakin_core::storage::MemoryStorage;
    use reqwest::Method;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        redirects: Mutex<Vec<Route>>,
    }

    impl Navigator for Recorder {
        fn navigate(&self, _route: Route) {}

        fn hard_redirect(&self, route: Route) {
            self.redirects.lock().unwrap().push(route);
        }
    }

    fn signed_in() -> (AuthInterceptor, Arc<Recorder>) {
        let session = SessionStore::new(MemoryStorage::new());
        session.login("jwt-1", UserSummary::new("u1", "Rina")).unwrap();
        let recorder = Arc::new(Recorder::default());
        (AuthInterceptor::new(session, recorder.clone()), recorder)
    }

    #[test]
    fn test_bearer_attached_when_signed_in() {
        let (interceptor, _) = signed_in();
        let mut request = ApiRequest::new(Method::GET, "/recipes");
        interceptor.before_request(&mut request);
        assert_eq!(request.bearer.as_deref(), Some("jwt-1"));
    }

    #[test]
    fn test_no_bearer_when_anonymous() {
        let session = SessionStore::new(MemoryStorage::new());
        let interceptor = AuthInterceptor::new(session, Arc::new(Recorder::default()));
        let mut request = ApiRequest::new(Method::GET, "/recipes");
        interceptor.before_request(&mut request);
        assert!(request.bearer.is_none());
    }

    #[test]
    fn test_401_terminates_session() {
        let (interceptor, recorder) = signed_in();
        let request = ApiRequest::new(Method::POST, "/recipes/9/save");

        let outcome = interceptor.after_response(&request, 401);

        assert_eq!(outcome, Interception::SessionTerminated);
        assert!(!interceptor.session().is_authenticated());
        assert_eq!(*recorder.redirects.lock().unwrap(), vec![Route::Login]);
    }

    #[test]
    fn test_401_on_login_passes_through() {
        let (interceptor, recorder) = signed_in();
        let request = ApiRequest::new(Method::POST, "/auth/login");

        assert_eq!(interceptor.after_response(&request, 401), Interception::Pass);
        assert!(interceptor.session().is_authenticated());
        assert!(recorder.redirects.lock().unwrap().is_empty());
    }

    #[test]
    fn test_other_statuses_pass() {
        let (interceptor, recorder) = signed_in();
        let request = ApiRequest::new(Method::GET, "/users/me/analytics");
        for status in [200, 204, 403, 404, 500] {
            assert_eq!(interceptor.after_response(&request, status), Interception::Pass);
        }
        assert!(interceptor.session().is_authenticated());
        assert!(recorder.redirects.lock().unwrap().is_empty());
    }
}
