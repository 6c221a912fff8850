//! Recipe search client: search a recipe API, open a recipe, scale its
//! servings, collect ingredients on a shopping list and keep liked recipes
//! in local storage.
//!
//! A [`Session`] owns the state of one user and reacts to [`Event`]s by calling
//! into the models and re-rendering the affected regions of a [`Page`].

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod storage;
pub mod views;

pub use api::{ForkifyClient, RecipeApi, RecipeData};
pub use crate::config::AppConfig;
pub use controller::{Event, Session};
pub use error::AppError;
pub use models::{Like, ParsedIngredient, Recipe, RecipeSummary, ShoppingListItem};
pub use views::Page;

/// Search recipes with the configured API
pub async fn search_recipes(query: &str) -> Result<Vec<RecipeSummary>, AppError> {
    let config = AppConfig::load()?;
    let client = ForkifyClient::new(&config)?;
    let mut search = models::Search::new(query);
    search.get_results(&client).await?;
    Ok(search.recipes.unwrap_or_default())
}

/// Fetch a recipe with parsed ingredients, cooking time and servings filled in
pub async fn fetch_recipe(id: &str) -> Result<Recipe, AppError> {
    let config = AppConfig::load()?;
    let client = ForkifyClient::new(&config)?;
    let mut recipe = Recipe::new(id);
    controller::prepare_recipe(&mut recipe, &client).await?;
    Ok(recipe)
}
