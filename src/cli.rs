use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn the ingredients you have into a recipe", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// AI provider to use [possible values: gemini, fake]
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Model for recipe text (provider-specific)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Model for recipe images (provider-specific)
    #[arg(long, global = true)]
    pub image_model: Option<String>,

    /// Log provider calls to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest a recipe from a comma-separated ingredient list
    Suggest {
        /// e.g. "chicken breast, cherry tomatoes, garlic, olive oil"; read from stdin when omitted
        ingredients: Option<String>,

        /// Print the suggestion as JSON instead of a formatted card
        #[arg(long)]
        json: bool,

        /// Write the generated image to this file
        #[arg(long, value_name = "PATH")]
        save_image: Option<PathBuf>,
    },

    /// Generate an image for a recipe name
    Image {
        description: String,

        /// Write the generated image to this file
        #[arg(long, value_name = "PATH")]
        save_image: Option<PathBuf>,
    },

    /// Enter ingredient lists one after another
    Interactive,

    /// Serve the JSON API over HTTP
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8080 (defaults to the configured server address)
        #[arg(long)]
        address: Option<String>,
    },
}
