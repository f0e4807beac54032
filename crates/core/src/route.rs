//! Client-side routes and the navigation seam

use std::fmt;

/// A client-side location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/discover`
    Discover,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/profile`
    Profile,
    /// `/create-recipe`
    CreateRecipe,
    /// `/edit-recipe/:id`
    EditRecipe(String),
    /// `/recipe/:id`
    RecipeDetail(String),
    /// Anything else; keeps the requested path
    NotFound(String),
}

impl Route {
    /// Match a path against the route table; query and fragment are ignored
    pub fn parse(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = bare.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["discover"] => Self::Discover,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["profile"] => Self::Profile,
            ["create-recipe"] => Self::CreateRecipe,
            ["edit-recipe", id] => Self::EditRecipe((*id).to_string()),
            ["recipe", id] => Self::RecipeDetail((*id).to_string()),
            _ => Self::NotFound(path.to_string()),
        }
    }

    /// Path for this route
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Discover => "/discover".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::CreateRecipe => "/create-recipe".to_string(),
            Self::EditRecipe(id) => format!("/edit-recipe/{id}"),
            Self::RecipeDetail(id) => format!("/recipe/{id}"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the user between routes
pub trait Navigator: Send + Sync {
    /// In-app route change; view state elsewhere survives
    fn navigate(&self, route: Route);

    /// Full navigation that discards all view state
    fn hard_redirect(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/discover?search=soto"), Route::Discover);
        assert_eq!(Route::parse("/login/"), Route::Login);
        assert_eq!(Route::parse("/create-recipe"), Route::CreateRecipe);
        assert_eq!(Route::parse("/recipe/42"), Route::RecipeDetail("42".into()));
        assert_eq!(Route::parse("/edit-recipe/a1"), Route::EditRecipe("a1".into()));
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/recipe/42/comments"),
            Route::NotFound("/recipe/42/comments".into())
        );
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".into()));
    }

    #[test]
    fn test_path_parse_inverse() {
        let routes = [
            Route::Home,
            Route::Discover,
            Route::Login,
            Route::Register,
            Route::Profile,
            Route::CreateRecipe,
            Route::EditRecipe("x9".into()),
            Route::RecipeDetail("x9".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
