use super::ingredients::{parse_ingredient, ParsedIngredient};
use crate::api::RecipeApi;
use crate::error::Result;
use log::debug;

/// Servings assumed when the API does not report any
pub const DEFAULT_SERVINGS: u32 = 4;

const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsDirection {
    Inc,
    Dec,
}

/// Full recipe currently on display
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub ingredients_raw: Vec<String>,
    pub ingredients: Vec<ParsedIngredient>,
    pub servings: u32,
    /// Cooking time in minutes
    pub time: u32,
    pub calories: Option<f64>,
    api_servings: Option<u32>,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            servings: DEFAULT_SERVINGS,
            ..Default::default()
        }
    }

    /// Load the recipe details. Fields are only assigned once the request succeeded.
    pub async fn get_recipe(&mut self, api: &dyn RecipeApi) -> Result<()> {
        let data = api.get_recipe(&self.id).await?;
        debug!(
            "Loaded recipe {} '{}' with {} ingredients",
            self.id,
            data.title,
            data.ingredients.len()
        );

        self.title = data.title;
        self.author = data.author;
        self.img = data.img;
        self.url = data.url;
        self.ingredients_raw = data.ingredients;
        self.ingredients.clear();
        self.calories = data.calories;
        self.api_servings = data.servings;
        Ok(())
    }

    /// Derive the structured ingredient list, one entry per raw line
    pub fn parse_ingredients(&mut self) {
        self.ingredients = self
            .ingredients_raw
            .iter()
            .map(|line| parse_ingredient(line))
            .collect();
    }

    /// 15 minutes for every 3 ingredients, rounded down, at least one period
    pub fn calc_time(&mut self) {
        let periods = (self.ingredients_raw.len() / INGREDIENTS_PER_PERIOD).max(1);
        self.time = periods as u32 * MINUTES_PER_PERIOD;
    }

    pub fn calc_servings(&mut self) {
        self.servings = self
            .api_servings
            .filter(|servings| *servings > 0)
            .unwrap_or(DEFAULT_SERVINGS);
    }

    /// Add or remove one serving, scaling every ingredient count. Servings never
    /// drop below one.
    pub fn update_servings(&mut self, direction: ServingsDirection) {
        let new_servings = match direction {
            ServingsDirection::Inc => self.servings.saturating_add(1),
            ServingsDirection::Dec => self.servings.saturating_sub(1).max(1),
        };
        if new_servings == self.servings {
            return;
        }

        let ratio = new_servings as f64 / self.servings as f64;
        for ingredient in &mut self.ingredients {
            if let Some(count) = ingredient.count.as_mut() {
                *count *= ratio;
            }
        }
        self.servings = new_servings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RecipeData;
    use crate::error::AppError;
    use crate::models::RecipeSummary;
    use async_trait::async_trait;

    struct FakeApi {
        data: Option<RecipeData>,
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn search(&self, _query: &str) -> Result<Vec<RecipeSummary>> {
            Ok(Vec::new())
        }

        async fn get_recipe(&self, _id: &str) -> Result<RecipeData> {
            self.data
                .clone()
                .ok_or_else(|| AppError::Api("Couldn't find recipe".to_string()))
        }
    }

    fn recipe_with(lines: &[&str]) -> Recipe {
        let mut recipe = Recipe::new("47746");
        recipe.ingredients_raw = lines.iter().map(|l| l.to_string()).collect();
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        recipe
    }

    #[tokio::test]
    async fn test_get_recipe_assigns_fields() {
        let api = FakeApi {
            data: Some(RecipeData {
                id: "47746".to_string(),
                title: "Best Pizza Dough Ever".to_string(),
                author: "101 Cookbooks".to_string(),
                img: "http://example.com/pizza.jpg".to_string(),
                url: "http://example.com/pizza".to_string(),
                ingredients: vec!["1/2 cup Sugar".to_string(), "2 apples".to_string()],
                servings: Some(2),
                calories: Some(350.0),
            }),
        };

        let mut recipe = Recipe::new("47746");
        recipe.get_recipe(&api).await.unwrap();
        recipe.parse_ingredients();
        recipe.calc_servings();

        assert_eq!(recipe.title, "Best Pizza Dough Ever");
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.calories, Some(350.0));
        assert_eq!(recipe.ingredients.len(), recipe.ingredients_raw.len());
    }

    #[tokio::test]
    async fn test_get_recipe_failure_leaves_no_partial_state() {
        let api = FakeApi { data: None };
        let mut recipe = Recipe::new("missing");

        let result = recipe.get_recipe(&api).await;
        assert!(matches!(result, Err(AppError::Api(_))));
        assert!(recipe.title.is_empty());
        assert!(recipe.ingredients_raw.is_empty());
    }

    #[test]
    fn test_calc_time() {
        assert_eq!(recipe_with(&[]).time, 15);
        assert_eq!(recipe_with(&["a", "b"]).time, 15);
        assert_eq!(recipe_with(&["a", "b", "c"]).time, 15);
        assert_eq!(recipe_with(&["a", "b", "c", "d", "e"]).time, 15);
        assert_eq!(recipe_with(&["a", "b", "c", "d", "e", "f"]).time, 30);
        assert_eq!(recipe_with(&["a"; 10]).time, 45);
    }

    #[test]
    fn test_calc_servings_defaults_to_four() {
        let recipe = recipe_with(&["1 egg"]);
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
    }

    #[test]
    fn test_update_servings_scales_counts() {
        let mut recipe = recipe_with(&["2 cups flour", "salt"]);
        recipe.update_servings(ServingsDirection::Inc);

        assert_eq!(recipe.servings, 5);
        assert!((recipe.ingredients[0].count.unwrap() - 2.5).abs() < 1e-9);
        assert_eq!(recipe.ingredients[1].count, None);
    }

    #[test]
    fn test_update_servings_never_below_one() {
        let mut recipe = recipe_with(&["1 egg"]);
        for _ in 0..10 {
            recipe.update_servings(ServingsDirection::Dec);
        }
        assert_eq!(recipe.servings, 1);
        assert!((recipe.ingredients[0].count.unwrap() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_update_servings_at_maximum_is_noop() {
        let mut recipe = recipe_with(&["2 cups flour"]);
        recipe.servings = u32::MAX;
        recipe.update_servings(ServingsDirection::Inc);

        assert_eq!(recipe.servings, u32::MAX);
        assert_eq!(recipe.ingredients[0].count, Some(2.0));

        recipe.update_servings(ServingsDirection::Dec);
        assert_eq!(recipe.servings, u32::MAX - 1);
        assert!(recipe.ingredients[0].count.unwrap().is_finite());
    }

    #[test]
    fn test_update_servings_round_trip() {
        let mut recipe = recipe_with(&["1 1/2 cups flour", "1/3 tsp salt", "3 eggs", "water"]);
        let original: Vec<Option<f64>> = recipe.ingredients.iter().map(|i| i.count).collect();

        for _ in 0..3 {
            recipe.update_servings(ServingsDirection::Dec);
        }
        assert_eq!(recipe.servings, 1);
        for _ in 0..7 {
            recipe.update_servings(ServingsDirection::Inc);
        }
        for _ in 0..4 {
            recipe.update_servings(ServingsDirection::Dec);
        }
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);

        for (ingredient, before) in recipe.ingredients.iter().zip(original) {
            match (ingredient.count, before) {
                (Some(after), Some(before)) => assert!((after - before).abs() < 1e-9),
                (after, before) => assert_eq!(after, before),
            }
        }
    }
}
