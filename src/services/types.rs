use serde::{Deserialize, Serialize};

/// Free-form ingredient list, expected to be comma-separated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuery {
    pub ingredients: String,
}

impl IngredientQuery {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageQuery {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub image_ref: String,
}

/// A generated recipe merged with its illustration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// URL or `data:` URI
    pub image_ref: String,
}

/// The structured part of a suggestion, as returned by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedRecipe {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl GeneratedRecipe {
    pub fn with_image(self, image_ref: String) -> RecipeSuggestion {
        RecipeSuggestion {
            name: self.recipe_name.trim().to_string(),
            ingredients: self.ingredients,
            steps: self.steps,
            image_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_serializes_camel_case() {
        let suggestion = RecipeSuggestion {
            name: "Soup".to_string(),
            ingredients: vec!["water".to_string()],
            steps: vec!["Boil.".to_string()],
            image_ref: "https://img.example/soup.png".to_string(),
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["imageRef"], "https://img.example/soup.png");
        assert!(value.get("image_ref").is_none());
    }

    #[test]
    fn generated_recipe_reads_model_field_names() {
        let generated: GeneratedRecipe = serde_json::from_str(
            r#"{"recipeName": " Garlic Chicken ", "ingredients": ["chicken"], "steps": ["Cook."]}"#,
        )
        .unwrap();
        let suggestion = generated.with_image("ref".to_string());
        assert_eq!(suggestion.name, "Garlic Chicken");
        assert_eq!(suggestion.image_ref, "ref");
    }
}
