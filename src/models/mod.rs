mod ingredients;
mod likes;
mod list;
mod recipe;
mod search;

pub use ingredients::{format_count, parse_ingredient, ParsedIngredient};
pub use likes::{Like, Likes, LIKES_KEY};
pub use list::{List, ShoppingListItem};
pub use recipe::{Recipe, ServingsDirection, DEFAULT_SERVINGS};
pub use search::{RecipeSummary, Search};
