pub mod base;
pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;

pub use base::{alert, clear_loader, render_loader, Fragment, Page, Position, Region};
