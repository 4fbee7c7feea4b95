pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod providers;
pub mod server;
pub mod services;
pub mod utils;

pub use crate::core::error::ChefError;
pub use crate::providers::{GenerativeProvider, MediaResponse, Modality};
pub use crate::services::{
    ImageGenerationService, ImageQuery, ImageResult, IngredientQuery, RecipeSuggestion,
    RecipeSuggestionService,
};
