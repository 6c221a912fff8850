use crate::api::RecipeApi;
use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search result entry. Fields not listed here are kept as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    #[serde(alias = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(alias = "publisher", default)]
    pub author: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single search query and its results
#[derive(Debug, Clone)]
pub struct Search {
    pub query: String,
    /// `None` until a request has succeeded
    pub recipes: Option<Vec<RecipeSummary>>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            recipes: None,
        }
    }

    /// Fetch results for the stored query. On failure `recipes` is left unset.
    pub async fn get_results(&mut self, api: &dyn RecipeApi) -> Result<&[RecipeSummary]> {
        let recipes = api.search(&self.query).await?;
        info!("Found {} recipes for '{}'", recipes.len(), self.query);
        Ok(self.recipes.insert(recipes).as_slice())
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        self.recipes.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_unknown_fields() {
        let json = r#"{
            "publisher": "101 Cookbooks",
            "title": "Best Pizza Dough Ever",
            "source_url": "http://www.101cookbooks.com/archives/001199.html",
            "recipe_id": "47746",
            "image_url": "http://forkify-api.herokuapp.com/images/best_pizza_dough_recipe1b20.jpg",
            "social_rank": 100
        }"#;
        let summary: RecipeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, "47746");
        assert_eq!(summary.author, "101 Cookbooks");
        assert_eq!(summary.extra.get("social_rank"), Some(&Value::from(100)));
        assert!(summary.extra.contains_key("source_url"));
    }

    #[test]
    fn test_new_search_has_no_results() {
        let search = Search::new("pizza");
        assert!(search.recipes.is_none());
        assert!(search.recipes().is_empty());
    }
}
