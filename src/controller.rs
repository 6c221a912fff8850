//! Session orchestration: turns user events into model calls and view updates.
//!
//! Network requests are split into a `begin_*` step (prepare the page, hand out
//! a ticket), the request itself (`PendingSearch::run`, `PendingRecipe::run`)
//! and a `complete_*` step that installs the result. Each `begin_*` bumps a
//! generation counter; a completion carrying an older generation is dropped, so
//! a slow response can never overwrite a newer one.

use crate::api::{ForkifyClient, RecipeApi};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::{Likes, List, Recipe, Search, ServingsDirection};
use crate::storage::{FileStorage, Storage};
use crate::views::search::Pagination;
use crate::views::{self, alert, clear_loader, render_loader, Page, Region};
use log::{debug, error, info, warn};
use std::sync::Arc;

pub const SEARCH_ERROR: &str = "Something went wrong with search ...";
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Things a user can do
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Submit the search form with this query
    Search(String),
    /// Click a pagination button
    GoToPage(usize),
    /// The URL fragment changed to `#<id>`
    Navigate(String),
    /// Page load, with the URL fragment at that time (may be empty)
    Load(String),
    DecreaseServings,
    IncreaseServings,
    AddToList,
    ToggleLike,
    /// Remove a shopping list item
    DeleteItem(String),
    /// A shopping list count input was edited
    UpdateCount(String, f64),
}

/// A search request that has been started but not yet applied
pub struct PendingSearch {
    generation: u64,
    search: Search,
    api: Arc<dyn RecipeApi>,
}

pub struct SearchOutcome {
    generation: u64,
    search: Search,
    result: Result<()>,
}

impl PendingSearch {
    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub async fn run(mut self) -> SearchOutcome {
        let result = self
            .search
            .get_results(self.api.as_ref())
            .await
            .map(|_| ());
        SearchOutcome {
            generation: self.generation,
            search: self.search,
            result,
        }
    }
}

/// A recipe request that has been started but not yet applied
pub struct PendingRecipe {
    generation: u64,
    recipe: Recipe,
    api: Arc<dyn RecipeApi>,
}

pub struct RecipeOutcome {
    generation: u64,
    recipe: Recipe,
    result: Result<()>,
}

impl PendingRecipe {
    pub fn id(&self) -> &str {
        &self.recipe.id
    }

    pub async fn run(mut self) -> RecipeOutcome {
        let result = prepare_recipe(&mut self.recipe, self.api.as_ref()).await;
        RecipeOutcome {
            generation: self.generation,
            recipe: self.recipe,
            result,
        }
    }
}

/// Fetch a recipe and derive ingredients, cooking time and servings
pub(crate) async fn prepare_recipe(recipe: &mut Recipe, api: &dyn RecipeApi) -> Result<()> {
    recipe.get_recipe(api).await?;
    recipe.parse_ingredients();
    recipe.calc_time();
    recipe.calc_servings();
    Ok(())
}

/// Everything one user session works with
pub struct Session {
    api: Arc<dyn RecipeApi>,
    storage: Arc<dyn Storage>,
    results_per_page: usize,
    search: Option<Search>,
    recipe: Option<Recipe>,
    list: Option<List>,
    likes: Option<Likes>,
    search_generation: u64,
    recipe_generation: u64,
}

impl Session {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        storage: Arc<dyn Storage>,
        results_per_page: usize,
    ) -> Self {
        Self {
            api,
            storage,
            results_per_page: results_per_page.max(1),
            search: None,
            recipe: None,
            list: None,
            likes: None,
            search_generation: 0,
            recipe_generation: 0,
        }
    }

    /// Session backed by the HTTP API and file storage from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = ForkifyClient::new(config)?;
        let storage = FileStorage::new(&config.storage_dir);
        Ok(Self::new(
            Arc::new(api),
            Arc::new(storage),
            config.results_per_page,
        ))
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn list(&self) -> Option<&List> {
        self.list.as_ref()
    }

    pub fn likes(&self) -> Option<&Likes> {
        self.likes.as_ref()
    }

    pub fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    /// Handle one event, turning failures into user feedback
    pub async fn dispatch(&mut self, event: Event, page: &mut Page) {
        debug!("Dispatching {:?}", event);
        let result = match event {
            Event::Search(query) => {
                page.set_search_input(query);
                self.control_search(page).await;
                Ok(())
            }
            Event::GoToPage(page_no) => self.go_to_page(page_no, page).map(|_| ()),
            Event::Navigate(hash) => {
                self.control_recipe(&hash, page).await;
                Ok(())
            }
            Event::Load(hash) => {
                self.restore_likes(page);
                self.control_recipe(&hash, page).await;
                Ok(())
            }
            Event::DecreaseServings => self.update_servings(ServingsDirection::Dec, page),
            Event::IncreaseServings => self.update_servings(ServingsDirection::Inc, page),
            Event::AddToList => self.control_list(page).map(|_| ()),
            Event::ToggleLike => self.control_like(page).map(|_| ()),
            Event::DeleteItem(id) => {
                self.delete_list_item(&id, page);
                Ok(())
            }
            Event::UpdateCount(id, count) => {
                self.update_list_count(&id, count, page);
                Ok(())
            }
        };

        if let Err(e) = result {
            report(e, page);
        }
    }

    /// Read the query from the page and run a search for it
    pub async fn control_search(&mut self, page: &mut Page) {
        if let Some(pending) = self.begin_search(page) {
            let outcome = pending.run().await;
            self.complete_search(outcome, page);
        }
    }

    /// Start a search for the current input. `None` when the input is blank.
    pub fn begin_search(&mut self, page: &mut Page) -> Option<PendingSearch> {
        let query = views::search::get_input(page).trim().to_string();
        if query.is_empty() {
            return None;
        }

        self.search_generation += 1;
        self.search = None;

        views::search::clear_input(page);
        views::search::clear_results(page);
        render_loader(page, Region::SearchResults);

        info!("Searching for '{}'", query);
        Some(PendingSearch {
            generation: self.search_generation,
            search: Search::new(query),
            api: Arc::clone(&self.api),
        })
    }

    /// Apply a finished search. Returns `false` if a newer search superseded it.
    pub fn complete_search(&mut self, outcome: SearchOutcome, page: &mut Page) -> bool {
        if outcome.generation != self.search_generation {
            debug!(
                "Discarding stale results for '{}' (generation {}, current {})",
                outcome.search.query, outcome.generation, self.search_generation
            );
            return false;
        }

        clear_loader(page, Region::SearchResults);
        match outcome.result {
            Ok(()) => {
                let search = self.search.insert(outcome.search);
                views::search::render_results(page, search.recipes(), 1, self.results_per_page);
            }
            Err(e) => {
                error!("Search for '{}' failed: {}", outcome.search.query, e);
                alert(page, SEARCH_ERROR);
            }
        }
        true
    }

    pub fn go_to_page(&mut self, page_no: usize, page: &mut Page) -> Result<Pagination> {
        let search = self.search.as_ref().ok_or(AppError::NoActiveSearch)?;
        views::search::clear_results(page);
        Ok(views::search::render_results(
            page,
            search.recipes(),
            page_no,
            self.results_per_page,
        ))
    }

    /// Load the recipe named by a URL fragment such as `#47746`
    pub async fn control_recipe(&mut self, hash: &str, page: &mut Page) {
        if let Some(pending) = self.begin_recipe(hash, page) {
            let outcome = pending.run().await;
            self.complete_recipe(outcome, page);
        }
    }

    /// Start loading a recipe. `None` when the fragment carries no id.
    pub fn begin_recipe(&mut self, hash: &str, page: &mut Page) -> Option<PendingRecipe> {
        let id = hash.trim().trim_start_matches('#');
        if id.is_empty() {
            return None;
        }

        self.recipe_generation += 1;
        self.recipe = None;

        views::recipe::clear_recipe(page);
        render_loader(page, Region::Recipe);
        if self.search.is_some() {
            views::search::highlight_selected(page, id);
        }

        info!("Loading recipe {}", id);
        Some(PendingRecipe {
            generation: self.recipe_generation,
            recipe: Recipe::new(id),
            api: Arc::clone(&self.api),
        })
    }

    /// Apply a finished recipe load. Returns `false` if a newer navigation superseded it.
    pub fn complete_recipe(&mut self, outcome: RecipeOutcome, page: &mut Page) -> bool {
        if outcome.generation != self.recipe_generation {
            debug!(
                "Discarding stale recipe {} (generation {}, current {})",
                outcome.recipe.id, outcome.generation, self.recipe_generation
            );
            return false;
        }

        clear_loader(page, Region::Recipe);
        match outcome.result {
            Ok(()) => {
                self.ensure_likes(page);
                let is_liked = self
                    .likes
                    .as_ref()
                    .map(|likes| likes.is_liked(&outcome.recipe.id))
                    .unwrap_or(false);
                let recipe = self.recipe.insert(outcome.recipe);
                views::recipe::render_recipe(page, recipe, is_liked);
            }
            Err(e) => {
                error!("Loading recipe {} failed: {}", outcome.recipe.id, e);
                alert(page, GENERIC_ERROR);
            }
        }
        true
    }

    pub fn update_servings(&mut self, direction: ServingsDirection, page: &mut Page) -> Result<()> {
        let recipe = self.recipe.as_mut().ok_or(AppError::NoActiveRecipe)?;
        if direction == ServingsDirection::Dec && recipe.servings <= 1 {
            return Ok(());
        }
        recipe.update_servings(direction);
        views::recipe::update_servings_ingredients(page, recipe);
        Ok(())
    }

    /// Add every ingredient of the current recipe to the shopping list.
    /// Returns the number of items added.
    pub fn control_list(&mut self, page: &mut Page) -> Result<usize> {
        let recipe = self.recipe.as_ref().ok_or(AppError::NoActiveRecipe)?;
        let list = self.list.get_or_insert_with(List::new);

        for ingredient in &recipe.ingredients {
            let item = list.add_item(
                ingredient.count.unwrap_or(1.0),
                ingredient.unit.clone(),
                ingredient.ingredient.clone(),
            );
            views::list::render_item(page, item);
        }
        Ok(recipe.ingredients.len())
    }

    pub fn delete_list_item(&mut self, id: &str, page: &mut Page) -> bool {
        let deleted = self
            .list
            .as_mut()
            .map(|list| list.delete_item(id))
            .unwrap_or(false);
        views::list::delete_item(page, id);
        deleted
    }

    pub fn update_list_count(&mut self, id: &str, count: f64, page: &mut Page) -> bool {
        let Some(list) = self.list.as_mut() else {
            return false;
        };
        if !list.update_count(id, count) {
            return false;
        }
        if let Some(item) = list.get(id) {
            views::list::update_item(page, item);
        }
        true
    }

    /// Like or unlike the current recipe. Returns whether it is liked afterwards.
    pub fn control_like(&mut self, page: &mut Page) -> Result<bool> {
        if self.recipe.is_none() {
            return Err(AppError::NoActiveRecipe);
        }
        self.ensure_likes(page);

        let recipe = self.recipe.as_ref().ok_or(AppError::NoActiveRecipe)?;
        let likes = self
            .likes
            .get_or_insert_with(|| Likes::new(Arc::clone(&self.storage)));

        let liked = if !likes.is_liked(&recipe.id) {
            let like = likes.add_like(
                recipe.id.clone(),
                recipe.title.clone(),
                recipe.author.clone(),
                recipe.img.clone(),
            )?;
            views::likes::toggle_like_btn(page, true);
            views::likes::render_like(page, like);
            true
        } else {
            likes.delete_like(&recipe.id)?;
            views::likes::toggle_like_btn(page, false);
            views::likes::delete_like(page, &recipe.id);
            false
        };

        views::likes::toggle_like_menu(page, likes.num_likes());
        Ok(liked)
    }

    /// Restore likes unless they are already loaded
    fn ensure_likes(&mut self, page: &mut Page) {
        if self.likes.is_none() {
            self.restore_likes(page);
        }
    }

    /// Load liked recipes from storage and show them
    pub fn restore_likes(&mut self, page: &mut Page) {
        let mut likes = Likes::new(Arc::clone(&self.storage));
        likes.read_storage();

        page.clear(Region::LikesList);
        views::likes::toggle_like_menu(page, likes.num_likes());
        for like in likes.likes() {
            views::likes::render_like(page, like);
        }
        self.likes = Some(likes);
    }
}

fn report(e: AppError, page: &mut Page) {
    match e {
        AppError::NoActiveRecipe | AppError::NoActiveSearch => warn!("Ignoring event: {}", e),
        e => {
            error!("{}", e);
            alert(page, GENERIC_ERROR);
        }
    }
}
