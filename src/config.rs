use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Search endpoint; the query is appended as the `q` parameter
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
    /// Recipe detail endpoint
    #[serde(default = "default_recipe_endpoint")]
    pub recipe_endpoint: String,
    /// Query parameter carrying the recipe id. When empty the id is appended
    /// to the endpoint as a path segment instead.
    #[serde(default = "default_recipe_id_param")]
    pub recipe_id_param: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Directory holding the persisted likes
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Optional file the rendered page is written to after every event
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_endpoint: default_search_endpoint(),
            recipe_endpoint: default_recipe_endpoint(),
            recipe_id_param: default_recipe_id_param(),
            timeout: default_timeout(),
            results_per_page: default_results_per_page(),
            storage_dir: default_storage_dir(),
            output: None,
        }
    }
}

// Default value functions
fn default_search_endpoint() -> String {
    "https://forkify-api.herokuapp.com/api/search".to_string()
}

fn default_recipe_endpoint() -> String {
    "https://forkify-api.herokuapp.com/api/get".to_string()
}

fn default_recipe_id_param() -> String {
    "rId".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_results_per_page() -> usize {
    10
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".forkify")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. forkify.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__RESULTS_PER_PAGE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("forkify").required(false))
        // Use double underscore for nested: FORKIFY__STORAGE_DIR
        .add_source(
            Environment::with_prefix("FORKIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    from_settings(settings)
}

fn from_settings(settings: Config) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = settings.try_deserialize()?;
    // A page size of zero would make every result unreachable
    config.results_per_page = config.results_per_page.max(1);
    Ok(config)
}
