//! Search page with debounced queries
//!
//! Query edits are coalesced: a fetch starts only once the query has been
//! unchanged for [`DEBOUNCE`]. A background task owns the fetching and
//! publishes each result set on a watch channel.

use crate::fixtures::{mock_recipes, or_fixture, DataSource};
use crate::App;
use masakin_api_client::endpoints::{RecipeQuery, ALL_CATEGORIES};
use masakin_api_client::Recipe;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period before a query is fetched
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// One completed fetch
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverResults {
    /// The query these results answer
    pub query: RecipeQuery,
    pub recipes: Vec<Recipe>,
    pub source: DataSource,
}

/// Discover page state
///
/// Dropping the view stops its fetch task.
pub struct DiscoverView {
    query: watch::Sender<RecipeQuery>,
    results: watch::Receiver<Option<DiscoverResults>>,
    task: JoinHandle<()>,
}

impl DiscoverView {
    /// Start with the `search` and `category` URL parameters
    pub fn spawn(app: App, params: &[(String, String)]) -> Self {
        let mut initial = RecipeQuery::new().with_category(ALL_CATEGORIES);
        for (key, value) in params {
            match key.as_str() {
                "search" => initial.search = Some(value.clone()),
                "category" => initial.category = Some(value.clone()),
                _ => {}
            }
        }

        let (query_tx, query_rx) = watch::channel(initial);
        let (results_tx, results_rx) = watch::channel(None);
        let task = tokio::spawn(run(app, query_rx, results_tx));
        Self {
            query: query_tx,
            results: results_rx,
            task,
        }
    }

    /// Current query
    pub fn query(&self) -> RecipeQuery {
        self.query.borrow().clone()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.query.send_modify(|q| q.search = Some(search));
    }

    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.query.send_modify(|q| q.category = Some(category));
    }

    /// URL parameters mirroring the query; blank search and `"All"` are omitted
    pub fn url_params(&self) -> Vec<(&'static str, String)> {
        self.query.borrow().to_params()
    }

    /// Latest published results, possibly for an older query
    pub fn results(&self) -> Option<DiscoverResults> {
        self.results.borrow().clone()
    }

    /// Wait for results answering the current query
    pub async fn settled(&mut self) -> Option<DiscoverResults> {
        loop {
            let wanted = self.query();
            if let Some(results) = self.results.borrow_and_update().as_ref() {
                if results.query == wanted {
                    return Some(results.clone());
                }
            }
            if self.results.changed().await.is_err() {
                return self.results();
            }
        }
    }
}

impl Drop for DiscoverView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    app: App,
    mut queries: watch::Receiver<RecipeQuery>,
    results: watch::Sender<Option<DiscoverResults>>,
) {
    loop {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(DEBOUNCE) => break,
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let query = queries.borrow_and_update().clone();
        debug!(?query, "Fetching discover results");
        let result = app.client().recipes().list(&query).await;
        let sourced = or_fixture(result, "recipes", || {
            mock_recipes()
                .iter()
                .filter(|r| query.matches(r))
                .cloned()
                .collect()
        });
        results.send_replace(Some(DiscoverResults {
            query,
            recipes: sourced.value,
            source: sourced.source,
        }));

        if queries.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_fetch_once() {
        let f = fixture(false);
        f.backend.reply(200, r#"{"data":[{"_id":"p1","title":"Pizza Rendang"}]}"#);
        let mut view = DiscoverView::spawn(f.app.clone(), &[]);

        view.set_search("p");
        tokio::time::sleep(Duration::from_millis(100)).await;
        view.set_search("piz");
        tokio::time::sleep(Duration::from_millis(100)).await;
        view.set_search("pizza");

        let results = view.settled().await.unwrap();
        assert_eq!(results.source, DataSource::Network);
        assert_eq!(results.recipes[0].id, "p1");

        let sent = f.backend.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].query, vec![("search".to_string(), "pizza".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_filters_samples() {
        let f = fixture(false);
        let mut view = DiscoverView::spawn(f.app.clone(), &[]);
        view.set_search("pizza");
        view.set_category("All");

        let results = view.settled().await.unwrap();
        assert_eq!(results.source, DataSource::Fixture);
        assert!(!results.recipes.is_empty());
        assert!(results
            .recipes
            .iter()
            .all(|r| r.title.to_lowercase().contains("pizza")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_params_round_trip() {
        let f = fixture(false);
        let params = vec![
            ("search".to_string(), "soto".to_string()),
            ("category".to_string(), "Lunch".to_string()),
        ];
        let view = DiscoverView::spawn(f.app.clone(), &params);
        assert_eq!(
            view.url_params(),
            vec![("search", "soto".to_string()), ("category", "Lunch".to_string())]
        );

        view.set_category(ALL_CATEGORIES);
        view.set_search("");
        assert!(view.url_params().is_empty());
    }
}
