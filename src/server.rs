//! HTTP JSON binding for the two services.

use crate::core::error::ChefError;
use crate::services::{
    ImageGenerationService, ImageQuery, ImageResult, IngredientQuery, RecipeSuggestion,
    RecipeSuggestionService,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeSuggestionService,
    pub images: ImageGenerationService,
    pub provider_name: &'static str,
    pub model: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub ChefError);

impl From<ChefError> for ApiError {
    fn from(err: ChefError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChefError::Validation(_) => StatusCode::BAD_REQUEST,
            ChefError::Generation(_) | ChefError::ImageGeneration(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if !self.0.is_validation() {
            tracing::error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/recipes", post(suggest_recipe))
        .route("/api/images", post(generate_image))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": state.provider_name,
        "model": state.model,
    }))
}

async fn suggest_recipe(
    State(state): State<AppState>,
    Json(query): Json<IngredientQuery>,
) -> ApiResult<Json<RecipeSuggestion>> {
    Ok(Json(state.recipes.suggest(&query).await?))
}

async fn generate_image(
    State(state): State<AppState>,
    Json(query): Json<ImageQuery>,
) -> ApiResult<Json<ImageResult>> {
    Ok(Json(state.images.generate_image(&query.description).await?))
}

pub async fn serve(state: AppState, address: &str) -> Result<(), ChefError> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!(
        provider = state.provider_name,
        model = %state.model,
        "pantrychef listening on http://{}",
        address
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;
    Ok(())
}
