//! Application layer of the Masakin client
//!
//! Everything a renderer needs to present the recipe community:
//! - View models for each page (home, discover, detail, profile, forms)
//! - Optimistic save, reaction and follow toggles
//! - Notifications and navigation history
//! - Fixture fallback when the backend is unreachable
//!
//! Views share one [`App`] context holding the API client, the navigator
//! and the notifier.

#![warn(clippy::all)]

pub mod fixtures;
pub mod interaction;
pub mod navigation;
pub mod notify;
pub mod views;

use masakin_api_client::MasakinClient;
use masakin_core::route::{Navigator, Route};
use masakin_core::session::SessionStore;
use std::sync::Arc;

pub use fixtures::{DataSource, Sourced};
pub use interaction::{InteractionToggle, RecipeInteractions, ToggleOutcome, ToggleState};
pub use navigation::History;
pub use notify::{Notification, NotificationCenter, NotificationLevel, Notifier};

/// Shared handles every view works with
#[derive(Clone)]
pub struct App {
    client: MasakinClient,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl App {
    /// Assemble the context; `navigator` should be the one the client redirects with
    pub fn new(
        client: MasakinClient,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            navigator,
            notifier,
        }
    }

    /// The API client
    pub fn client(&self) -> &MasakinClient {
        &self.client
    }

    /// The process-wide session
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// The notifier
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Shared handle to the notifier
    pub fn notifier_handle(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// In-app navigation
    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::fixtures::{DataSource, Sourced};
    pub use crate::interaction::{RecipeInteractions, ToggleOutcome};
    pub use crate::navigation::History;
    pub use crate::notify::{NotificationCenter, Notifier};
    pub use crate::views::{
        DetailView, DiscoverView, EditorMode, HomeView, ListField, LoginForm, ProfileView,
        RecipeEditor, RecipeForm, RegisterForm,
    };
    pub use crate::App;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted backend shared by the view tests

    use super::*;
    use async_trait::async_trait;
    use masakin_api_client::transport::{ApiRequest, HttpTransport, RawResponse};
    use masakin_api_client::{ApiResult, ClientConfig};
    use masakin_core::session::UserSummary;
    use masakin_core::storage::MemoryStorage;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued responses; an empty queue answers 503
    #[derive(Default)]
    pub struct Backend {
        responses: Mutex<VecDeque<RawResponse>>,
        pub requests: Mutex<Vec<ApiRequest>>,
    }

    impl Backend {
        pub fn reply(&self, status: u16, body: &str) -> &Self {
            self.responses.lock().unwrap().push_back(RawResponse {
                status,
                body: body.to_string(),
            });
            self
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for Backend {
        async fn send(&self, request: &ApiRequest) -> ApiResult<RawResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(RawResponse {
                    status: 503,
                    body: r#"{"message":"Service unavailable"}"#.to_string(),
                }))
        }
    }

    pub struct Fixture {
        pub app: App,
        pub backend: Arc<Backend>,
        pub history: Arc<History>,
        pub notices: Arc<NotificationCenter>,
    }

    /// Context with user `u1` ("Rina") signed in when `signed_in`
    pub fn fixture(signed_in: bool) -> Fixture {
        let session = SessionStore::new(MemoryStorage::new());
        if signed_in {
            session
                .login("jwt-abc", UserSummary::new("u1", "Rina"))
                .unwrap();
        }
        let backend = Arc::new(Backend::default());
        let history = Arc::new(History::new());
        let notices = Arc::new(NotificationCenter::new());
        let client = MasakinClient::with_transport(
            ClientConfig::development(),
            backend.clone(),
            session,
            history.clone(),
        );
        Fixture {
            app: App::new(client, history.clone(), notices.clone()),
            backend,
            history,
            notices,
        }
    }
}
