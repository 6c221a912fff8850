use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::RecipeSummary;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Remote recipe catalogue
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Search recipes matching `query`
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;

    /// Fetch the full record of a single recipe
    async fn get_recipe(&self, id: &str) -> Result<RecipeData>;
}

/// Recipe detail as returned by the API
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeData {
    #[serde(alias = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(alias = "publisher", default)]
    pub author: String,
    #[serde(alias = "image_url", default)]
    pub img: String,
    #[serde(alias = "source_url", default)]
    pub url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub calories: Option<f64>,
}

#[derive(Deserialize)]
struct SearchResponse {
    recipes: Vec<RecipeSummary>,
}

#[derive(Deserialize)]
struct RecipeResponse {
    recipe: RecipeData,
}

/// HTTP client for the forkify recipe API
pub struct ForkifyClient {
    client: Client,
    search_endpoint: String,
    recipe_endpoint: String,
    recipe_id_param: String,
}

impl ForkifyClient {
    /// Create a new client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("forkify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ForkifyClient {
            client,
            search_endpoint: config.search_endpoint.clone(),
            recipe_endpoint: config.recipe_endpoint.clone(),
            recipe_id_param: config.recipe_id_param.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: &str) -> Self {
        ForkifyClient {
            client: Client::new(),
            search_endpoint: format!("{}/api/search", base_url),
            recipe_endpoint: format!("{}/api/get", base_url),
            recipe_id_param: "rId".to_string(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.search_endpoint)?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    fn recipe_url(&self, id: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.recipe_endpoint)?;
        if self.recipe_id_param.is_empty() {
            url.path_segments_mut()
                .map_err(|_| AppError::InvalidUrl(self.recipe_endpoint.clone()))?
                .pop_if_empty()
                .push(id);
        } else {
            url.query_pairs_mut().append_pair(&self.recipe_id_param, id);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The API reports unknown queries and ids as `{"error": "..."}`
        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(_) if !status.is_success() => {
                return Err(AppError::Api(format!("HTTP {}", status)));
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = json.get("error").and_then(Value::as_str) {
            return Err(AppError::Api(error.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Api(format!("HTTP {}", status)));
        }

        Ok(serde_json::from_value(json)?)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| AppError::InvalidUrl(format!("{}: {}", endpoint, e)))
}

#[async_trait]
impl RecipeApi for ForkifyClient {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let url = self.search_url(query)?;
        let response: SearchResponse = self.get_json(url).await?;
        debug!("Search '{}' returned {} recipes", query, response.recipes.len());
        Ok(response.recipes)
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeData> {
        let url = self.recipe_url(id)?;
        let response: RecipeResponse = self.get_json(url).await?;
        Ok(response.recipe)
    }
}
