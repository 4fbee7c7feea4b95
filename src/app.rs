use crate::cli::{Args, Command};
use crate::config::Config;
use crate::core::error::ChefError;
use crate::display;
use crate::input::{self, InputLine};
use crate::providers::GenerativeProvider;
use crate::server::{self, AppState};
use crate::services::{ImageGenerationService, IngredientQuery, RecipeSuggestionService};
use crate::utils::data_uri::{DataUri, extension_for};
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Application {
    pub args: Args,
    pub config: Config,
    provider: Arc<dyn GenerativeProvider>,
    recipes: RecipeSuggestionService,
    images: ImageGenerationService,
    http: reqwest::Client,
}

impl Application {
    /// Wire both services to one shared provider.
    pub fn new(args: Args, config: Config, provider: Arc<dyn GenerativeProvider>) -> Self {
        let images = ImageGenerationService::new(provider.clone());
        let recipes = RecipeSuggestionService::new(
            provider.clone(),
            images.clone(),
            config.placeholder_image(),
        );
        Self {
            args,
            config,
            provider,
            recipes,
            images,
            http: reqwest::Client::new(),
        }
    }

    pub async fn run(&mut self) -> Result<(), ChefError> {
        match &self.args.command {
            Command::Suggest {
                ingredients,
                json,
                save_image,
            } => {
                let ingredients = match ingredients {
                    Some(list) => list.clone(),
                    None => read_stdin()?,
                };
                self.handle_suggest(&ingredients, *json, save_image.as_deref())
                    .await
            }
            Command::Image {
                description,
                save_image,
            } => self.handle_image(description, save_image.as_deref()).await,
            Command::Interactive => self.handle_interactive().await,
            Command::Serve { address } => {
                let address = address
                    .clone()
                    .unwrap_or_else(|| self.config.server.address());
                self.handle_serve(&address).await
            }
        }
    }

    async fn handle_suggest(
        &self,
        ingredients: &str,
        json: bool,
        save_image: Option<&Path>,
    ) -> Result<(), ChefError> {
        if !json {
            display::display_generating("Thinking up a recipe...");
        }
        let recipe = self.recipes.suggest(&IngredientQuery::new(ingredients)).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        } else {
            display::display_recipe(&recipe);
        }

        if let Some(path) = save_image {
            if recipe.image_ref == self.recipes.placeholder_image() {
                tracing::warn!("No image was generated; saving the placeholder instead");
            }
            let saved = self.save_image(&recipe.image_ref, path).await?;
            display::display_saved(&saved);
        }
        Ok(())
    }

    async fn handle_image(&self, description: &str, save_image: Option<&Path>) -> Result<(), ChefError> {
        display::display_generating("Painting your dish...");
        let result = self.images.generate_image(description).await?;

        match save_image {
            Some(path) => {
                let saved = self.save_image(&result.image_ref, path).await?;
                display::display_saved(&saved);
            }
            None => display::display_image_ref(&result.image_ref),
        }
        Ok(())
    }

    async fn handle_interactive(&self) -> Result<(), ChefError> {
        println!(
            "What's in your fridge? Enter ingredients separated by commas. Type '/help' for commands, Ctrl+D or /quit to exit."
        );

        let mut editor = input::create_editor()?;

        while let Some(line) = input::read_input(&mut editor)? {
            match input::parse_line(&line) {
                InputLine::Empty => continue,
                InputLine::Quit => break,
                InputLine::Help => println!("{}", input::help_text()),
                InputLine::Unknown(name) => {
                    eprintln!("Unknown command: /{}. Type /help for commands.", name)
                }
                InputLine::Image(description) => {
                    display::display_generating("Painting your dish...");
                    match self.images.generate_image(&description).await {
                        Ok(result) => display::display_image_ref(&result.image_ref),
                        Err(e) => {
                            tracing::debug!(error = %e, "Image request failed");
                            display::display_error(&e);
                        }
                    }
                }
                InputLine::Ingredients(ingredients) => {
                    display::display_generating("Thinking up a recipe...");
                    match self.recipes.suggest(&IngredientQuery::new(ingredients)).await {
                        Ok(recipe) => display::display_recipe(&recipe),
                        Err(e) => {
                            tracing::debug!(error = %e, "Suggestion failed");
                            display::display_error(&e);
                        }
                    }
                }
            }
        }

        input::save_history(&mut editor)?;
        Ok(())
    }

    async fn handle_serve(&self, address: &str) -> Result<(), ChefError> {
        let state = AppState {
            recipes: self.recipes.clone(),
            images: self.images.clone(),
            provider_name: self.provider.provider_name(),
            model: self.provider.model_name().to_string(),
        };
        server::serve(state, address).await
    }

    /// Write an image reference to disk: data URIs are decoded, URLs downloaded.
    /// A path without an extension gets one from the image's MIME type.
    async fn save_image(&self, image_ref: &str, path: &Path) -> Result<PathBuf, ChefError> {
        let (bytes, extension) = if DataUri::is_data_uri(image_ref) {
            let data = DataUri::parse(image_ref)?;
            let extension = data.extension();
            (data.bytes, extension)
        } else {
            let response = self.http.get(image_ref).send().await?.error_for_status()?;
            let extension = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|ct| extension_for(ct.split(';').next().unwrap_or(ct).trim()))
                .unwrap_or("bin");
            (response.bytes().await?.to_vec(), extension)
        };

        let path = if path.extension().is_none() {
            path.with_extension(extension)
        } else {
            path.to_path_buf()
        };
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

fn read_stdin() -> Result<String, ChefError> {
    if io::stdin().is_terminal() {
        return Err(ChefError::Validation(
            "Please enter at least one ingredient.".to_string(),
        ));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
