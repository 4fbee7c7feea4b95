use crate::core::error::ChefError;
use crate::providers::GenerativeProvider;
use crate::services::image::ImageGenerationService;
use crate::services::schema::Schema;
use crate::services::types::{GeneratedRecipe, IngredientQuery, RecipeSuggestion};
use std::sync::Arc;

const RECIPE_PROMPT: &str = "You are a recipe suggestion AI. Given the following ingredients, \
suggest a recipe. The output should be a JSON object conforming to the schema.";

/// Shape the model must return for a suggestion (everything except the image).
pub fn recipe_schema() -> Schema {
    Schema::object(vec![
        (
            "recipeName",
            Schema::string("The name of the suggested recipe.").non_empty(),
        ),
        (
            "ingredients",
            Schema::array(
                "The list of ingredients required for the recipe.",
                Schema::string("One ingredient, with quantity when known.").non_empty(),
            )
            .non_empty(),
        ),
        (
            "steps",
            Schema::array(
                "The steps to prepare the recipe.",
                Schema::string("One preparation step.").non_empty(),
            )
            .non_empty(),
        ),
    ])
}

pub fn recipe_prompt(ingredients: &str, schema: &Schema) -> String {
    let schema_text = serde_json::to_string_pretty(&schema.to_json_schema())
        .unwrap_or_else(|_| schema.to_json_schema().to_string());
    format!(
        "{}\n\nSchema:\n{}\n\nIngredients: {}\n",
        RECIPE_PROMPT, schema_text, ingredients
    )
}

/// Two-step pipeline: structured recipe text, then an image of the named dish.
#[derive(Clone)]
pub struct RecipeSuggestionService {
    provider: Arc<dyn GenerativeProvider>,
    images: ImageGenerationService,
    placeholder_image: String,
    schema: Schema,
}

impl RecipeSuggestionService {
    pub fn new(
        provider: Arc<dyn GenerativeProvider>,
        images: ImageGenerationService,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            images,
            placeholder_image: placeholder_image.into(),
            schema: recipe_schema(),
        }
    }

    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    /// Suggest a recipe for `query`.
    ///
    /// Returns `Validation` for blank input (no backend call), `Generation` when
    /// the recipe call fails or its payload does not match [`recipe_schema`].
    /// A failed image never fails the suggestion: the placeholder is used instead.
    pub async fn suggest(&self, query: &IngredientQuery) -> Result<RecipeSuggestion, ChefError> {
        let ingredients = query.ingredients.trim();
        if ingredients.is_empty() {
            return Err(ChefError::Validation(
                "Please enter at least one ingredient.".to_string(),
            ));
        }

        tracing::debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            "Requesting recipe suggestion"
        );

        let recipe = self.generate_recipe(ingredients).await?;

        let image_ref = match self.images.generate_image(&recipe.recipe_name).await {
            Ok(result) => result.image_ref,
            Err(e) => {
                tracing::warn!(
                    recipe = %recipe.recipe_name,
                    error = %e,
                    "Image generation failed, using placeholder"
                );
                self.placeholder_image.clone()
            }
        };

        Ok(recipe.with_image(image_ref))
    }

    async fn generate_recipe(&self, ingredients: &str) -> Result<GeneratedRecipe, ChefError> {
        let prompt = recipe_prompt(ingredients, &self.schema);

        let value = self
            .provider
            .structured_generate(&prompt, &self.schema)
            .await
            .map_err(|e| ChefError::Generation(e.to_string()))?;

        self.schema.validate(&value).map_err(|violation| {
            ChefError::Generation(format!("Response does not match recipe schema: {}", violation))
        })?;

        serde_json::from_value(value).map_err(|e| {
            ChefError::Generation(format!("Response does not match recipe schema: {}", e))
        })
    }
}
