//! Recipe and image generation on top of a [`GenerativeProvider`](crate::providers::GenerativeProvider).

pub mod image;
pub mod recipe;
pub mod schema;
pub mod types;

pub use image::ImageGenerationService;
pub use recipe::RecipeSuggestionService;
pub use types::{ImageQuery, ImageResult, IngredientQuery, RecipeSuggestion};
