//! Built-in recipes shown when the backend is unreachable
//!
//! Views that can degrade gracefully record where their data came from
//! with [`Sourced`], so a renderer can flag stale sample content.

use masakin_api_client::normalize::normalize_recipe;
use masakin_api_client::Recipe;
use once_cell::sync::Lazy;
use serde_json::json;
use std::fmt::Display;
use tracing::warn;

/// Recipe categories offered by filters and the editor
pub const CATEGORIES: &[&str] = &[
    "Breakfast",
    "Lunch",
    "Dinner",
    "Dessert",
    "Snack",
    "Drinks",
];

/// Category filter choices, `"All"` first
pub fn filter_categories() -> Vec<&'static str> {
    std::iter::once(masakin_api_client::endpoints::ALL_CATEGORIES)
        .chain(CATEGORIES.iter().copied())
        .collect()
}

static MOCK_RECIPES: Lazy<Vec<Recipe>> = Lazy::new(|| {
    [
        json!({"id": "1", "title": "Nasi Goreng Kampung", "category": "Dinner", "cookingTime": 20,
               "description": "Smoky village-style fried rice with shrimp paste and fried shallots.",
               "images": ["https://images.masakin.app/nasi-goreng.jpg"], "createdAt": "2025-01-12T12:00:00Z",
               "author": {"_id": "chef-1", "name": "Sari Wulandari"},
               "ingredients": ["2 cups day-old rice", "1 tsp shrimp paste", "2 shallots", "1 egg"],
               "steps": ["Pound the aromatics", "Fry the paste", "Toss in the rice", "Top with a fried egg"]}),
        json!({"id": "2", "title": "Margherita Pizza", "category": "Dinner", "cookingTime": 45,
               "description": "Thin crust, San Marzano tomatoes and fresh basil.",
               "images": ["https://images.masakin.app/margherita.jpg"], "createdAt": "2025-01-15T12:00:00Z",
               "author": {"_id": "chef-2", "name": "Marco Rossi"},
               "ingredients": ["Pizza dough", "Tomato sauce", "Mozzarella", "Basil"],
               "steps": ["Stretch the dough", "Add toppings", "Bake at 250C for 8 minutes"],
               "videoUrl": "https://www.youtube.com/watch?v=1-SJGQ2HLp8"}),
        json!({"id": "3", "title": "Bubur Ayam", "category": "Breakfast", "cookingTime": 60,
               "description": "Silky rice porridge with shredded chicken and crackers.",
               "images": ["https://images.masakin.app/bubur-ayam.jpg"], "createdAt": "2025-01-18T12:00:00Z",
               "author": {"_id": "chef-1", "name": "Sari Wulandari"},
               "ingredients": ["1 cup rice", "Chicken thighs", "Ginger", "Soy sauce"],
               "steps": ["Simmer rice in stock", "Poach and shred chicken", "Serve with toppings"]}),
        json!({"id": "4", "title": "Gado-Gado", "category": "Lunch", "cookingTime": 30,
               "description": "Blanched vegetables, tofu and egg under a rich peanut sauce.",
               "images": ["https://images.masakin.app/gado-gado.jpg"], "createdAt": "2025-01-20T12:00:00Z",
               "author": {"_id": "chef-3", "name": "Dewi Lestari"},
               "ingredients": ["Long beans", "Bean sprouts", "Tofu", "Peanut sauce"],
               "steps": ["Blanch the vegetables", "Fry the tofu", "Dress with peanut sauce"]}),
        json!({"id": "5", "title": "Klepon", "category": "Dessert", "cookingTime": 40,
               "description": "Pandan rice cakes filled with molten palm sugar.",
               "images": ["https://images.masakin.app/klepon.jpg"], "createdAt": "2025-01-22T12:00:00Z",
               "author": {"_id": "chef-3", "name": "Dewi Lestari"},
               "ingredients": ["Glutinous rice flour", "Pandan juice", "Palm sugar", "Grated coconut"],
               "steps": ["Knead the dough", "Fill with palm sugar", "Boil until they float", "Roll in coconut"]}),
        json!({"id": "6", "title": "Es Cendol", "category": "Drinks", "cookingTime": 25,
               "description": "Iced coconut milk with pandan jelly and palm sugar syrup.",
               "images": ["https://images.masakin.app/es-cendol.jpg"], "createdAt": "2025-01-25T12:00:00Z",
               "author": {"_id": "chef-4", "name": "Agus Pratama"},
               "ingredients": ["Rice flour", "Pandan", "Coconut milk", "Palm sugar"],
               "steps": ["Cook the jelly", "Press through a sieve", "Assemble over ice"]}),
        json!({"id": "7", "title": "Pizza Rendang", "category": "Dinner", "cookingTime": 50,
               "description": "Slow-cooked beef rendang on a crisp pizza base.",
               "images": ["https://images.masakin.app/pizza-rendang.jpg"], "createdAt": "2025-02-01T12:00:00Z",
               "author": {"_id": "chef-2", "name": "Marco Rossi"},
               "ingredients": ["Pizza dough", "Beef rendang", "Mozzarella", "Red onion"],
               "steps": ["Shred the rendang", "Top the dough", "Bake until bubbling"]}),
        json!({"id": "8", "title": "Pisang Goreng", "category": "Snack", "cookingTime": 15,
               "description": "Crisp battered banana fritters.",
               "images": ["https://images.masakin.app/pisang-goreng.jpg"], "createdAt": "2025-02-03T12:00:00Z",
               "author": {"_id": "chef-4", "name": "Agus Pratama"},
               "ingredients": ["Ripe plantains", "Rice flour", "Lime water"],
               "steps": ["Make the batter", "Dip the bananas", "Deep fry until golden"]}),
        json!({"id": "9", "title": "Soto Ayam", "category": "Lunch", "cookingTime": 75,
               "description": "Turmeric chicken soup with vermicelli and lime.",
               "images": ["https://images.masakin.app/soto-ayam.jpg"], "createdAt": "2025-02-06T12:00:00Z",
               "author": {"_id": "chef-1", "name": "Sari Wulandari"},
               "ingredients": ["Whole chicken", "Turmeric", "Lemongrass", "Vermicelli"],
               "steps": ["Make the spice paste", "Simmer the chicken", "Assemble bowls"]}),
    ]
    .iter()
    .map(normalize_recipe)
    .collect()
});

/// The built-in sample recipes
pub fn mock_recipes() -> &'static [Recipe] {
    &MOCK_RECIPES
}

/// Sample recipe by id
pub fn find_mock_recipe(id: &str) -> Option<&'static Recipe> {
    MOCK_RECIPES.iter().find(|r| r.id == id)
}

/// Where a view's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Network,
    Fixture,
}

/// A value tagged with its [`DataSource`]
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn network(value: T) -> Self {
        Self {
            value,
            source: DataSource::Network,
        }
    }

    pub fn fixture(value: T) -> Self {
        Self {
            value,
            source: DataSource::Fixture,
        }
    }

    pub fn is_fixture(&self) -> bool {
        self.source == DataSource::Fixture
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            value: f(self.value),
            source: self.source,
        }
    }
}

/// Use the network result, or `fallback()` when the call failed
pub fn or_fixture<T, E: Display>(
    result: Result<T, E>,
    what: &str,
    fallback: impl FnOnce() -> T,
) -> Sourced<T> {
    match result {
        Ok(value) => Sourced::network(value),
        Err(e) => {
            warn!(error = %e, "Failed to fetch {}, using sample data", what);
            Sourced::fixture(fallback())
        }
    }
}
