//! Recorded navigation history

use masakin_core::route::{Navigator, Route};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// How a history entry was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// In-app route change
    Push,
    /// Full reset; view state was discarded
    Reset,
}

/// Navigator that records every transition
///
/// Starts at `/`.
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<(Route, Transition)>>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(vec![(Route::Home, Transition::Push)]),
        }
    }

    /// The route currently shown
    pub fn current(&self) -> Route {
        self.entries()
            .last()
            .map_or(Route::Home, |(route, _)| route.clone())
    }

    /// Every route visited, oldest first
    pub fn routes(&self) -> Vec<Route> {
        self.entries().into_iter().map(|(route, _)| route).collect()
    }

    /// Number of full resets
    pub fn hard_resets(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, t)| *t == Transition::Reset)
            .count()
    }

    /// Every entry with how it was reached
    pub fn entries(&self) -> Vec<(Route, Transition)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, route: Route, transition: Transition) {
        debug!(route = %route, ?transition, "Navigate");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((route, transition));
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        self.push(route, Transition::Push);
    }

    fn hard_redirect(&self, route: Route) {
        self.push(route, Transition::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_transitions() {
        let history = History::new();
        assert_eq!(history.current(), Route::Home);

        history.navigate(Route::RecipeDetail("r1".to_string()));
        history.hard_redirect(Route::Login);

        assert_eq!(history.current(), Route::Login);
        assert_eq!(history.hard_resets(), 1);
        assert_eq!(
            history.routes(),
            vec![Route::Home, Route::RecipeDetail("r1".to_string()), Route::Login]
        );
    }
}
