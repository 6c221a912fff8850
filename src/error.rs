use thiserror::Error;

/// Errors that can occur while searching, loading or bookmarking recipes
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to reach the recipe API
    #[error("Failed to fetch URL: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body or stored data was not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The recipe API answered with an error payload
    #[error("Recipe API error: {0}")]
    Api(String),

    /// A configured endpoint is not a valid URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The recipe is already in the likes collection
    #[error("Recipe {0} is already liked")]
    AlreadyLiked(String),

    /// An action needs a loaded recipe but none is active
    #[error("No recipe is currently loaded")]
    NoActiveRecipe,

    /// Pagination was requested before any search succeeded
    #[error("No search results to page through")]
    NoActiveSearch,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AppError>;
