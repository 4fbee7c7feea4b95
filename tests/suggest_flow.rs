use pantrychef::config::DEFAULT_PLACEHOLDER_IMAGE;
use pantrychef::providers::fake::FakeProvider;
use pantrychef::{
    ChefError, GenerativeProvider, ImageGenerationService, IngredientQuery, RecipeSuggestion,
    RecipeSuggestionService,
};
use std::sync::Arc;

const INPUT: &str = "chicken breast, cherry tomatoes, garlic, olive oil";

fn services(provider: FakeProvider) -> (RecipeSuggestionService, ImageGenerationService, Arc<FakeProvider>) {
    let provider = Arc::new(provider);
    let shared: Arc<dyn GenerativeProvider> = provider.clone();
    let images = ImageGenerationService::new(shared.clone());
    let recipes = RecipeSuggestionService::new(shared, images.clone(), DEFAULT_PLACEHOLDER_IMAGE);
    (recipes, images, provider)
}

fn assert_fully_populated(recipe: &RecipeSuggestion) {
    assert!(!recipe.name.trim().is_empty());
    assert!(!recipe.ingredients.is_empty());
    assert!(!recipe.steps.is_empty());
    assert!(!recipe.image_ref.is_empty());
}

#[tokio::test]
async fn chicken_scenario_produces_complete_recipe() {
    let (recipes, _, provider) = services(FakeProvider::pantry());
    let recipe = recipes.suggest(&IngredientQuery::new(INPUT)).await.unwrap();

    assert_fully_populated(&recipe);
    let inputs: Vec<&str> = INPUT.split(',').map(str::trim).collect();
    assert!(
        recipe
            .ingredients
            .iter()
            .any(|item| inputs.iter().any(|input| item.contains(input))),
        "expected at least one input ingredient in {:?}",
        recipe.ingredients
    );
    assert_eq!(provider.structured_calls(), 1);
    assert_eq!(provider.media_calls(), 1);
}

#[tokio::test]
async fn payload_missing_steps_fails_generation() {
    let (recipes, _, _) = services(FakeProvider::new().with_default_response(
        r#"{"recipeName": "Chicken Bake", "ingredients": ["chicken breast"]}"#,
    ));
    let err = recipes.suggest(&IngredientQuery::new(INPUT)).await.unwrap_err();
    assert!(matches!(err, ChefError::Generation(_)));
}

#[tokio::test]
async fn blank_input_never_reaches_provider() {
    let (recipes, images, provider) = services(FakeProvider::pantry());

    assert!(recipes.suggest(&IngredientQuery::new(" \n ")).await.unwrap_err().is_validation());
    assert!(images.generate_image("").await.unwrap_err().is_validation());
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn image_for_named_dish() {
    let (_, images, _) = services(FakeProvider::new());
    let result = images.generate_image("Margherita Pizza").await.unwrap();
    assert!(!result.image_ref.is_empty());

    let (_, images, _) = services(FakeProvider::new().without_media());
    let err = images.generate_image("Margherita Pizza").await.unwrap_err();
    assert!(matches!(err, ChefError::ImageGeneration(_)));
}

#[tokio::test]
async fn suggestion_survives_missing_image_with_placeholder() {
    let (recipes, _, _) = services(FakeProvider::pantry().without_media());
    let recipe = recipes.suggest(&IngredientQuery::new(INPUT)).await.unwrap();

    assert_fully_populated(&recipe);
    assert_eq!(recipe.image_ref, DEFAULT_PLACEHOLDER_IMAGE);
}

#[tokio::test]
async fn concurrent_suggestions_are_independent() {
    let (recipes, _, provider) = services(FakeProvider::pantry());

    let handles: Vec<_> = ["leek, potato", "tofu, rice", "apple, oats", "beans, corn"]
        .into_iter()
        .map(|input| {
            let recipes = recipes.clone();
            tokio::spawn(async move { recipes.suggest(&IngredientQuery::new(input)).await })
        })
        .collect();

    for handle in handles {
        let recipe = handle.await.unwrap().unwrap();
        assert_fully_populated(&recipe);
    }
    assert_eq!(provider.structured_calls(), 4);
    assert_eq!(provider.media_calls(), 4);
}
