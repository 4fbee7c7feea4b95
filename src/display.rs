use crate::core::error::ChefError;
use crate::services::RecipeSuggestion;
use crate::utils::data_uri::DataUri;
use crate::utils::text::{abbreviate, wrap_text};
use console::style;
use std::path::Path;
use termimad::MadSkin;

fn box_width() -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(50)
}

/// Markdown card for a suggestion: title, image, ingredient bullets, numbered steps.
pub fn recipe_markdown(recipe: &RecipeSuggestion) -> String {
    let mut md = format!("# {}\n\n", recipe.name);

    md.push_str("## Ingredients\n\n");
    for item in &recipe.ingredients {
        md.push_str(&format!("* {}\n", item));
    }

    md.push_str("\n## Steps\n\n");
    for (i, step) in recipe.steps.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, step));
    }
    md
}

pub fn display_recipe(recipe: &RecipeSuggestion) {
    println!("\n{}", style("🍳 YOUR RECIPE").bold().magenta());
    let skin = MadSkin::default();
    skin.print_text(&recipe_markdown(recipe));
    display_image_ref(&recipe.image_ref);
}

/// Show where the image lives. Data URIs are summarized rather than dumped.
pub fn display_image_ref(image_ref: &str) {
    let width = box_width();
    let label = if DataUri::is_data_uri(image_ref) {
        match DataUri::parse(image_ref) {
            Ok(data) => format!(
                "inline {} image ({} bytes), save it with --save-image",
                data.mime_type,
                data.bytes.len()
            ),
            Err(_) => abbreviate(image_ref, width.saturating_sub(4)),
        }
    } else {
        image_ref.to_string()
    };

    let top_border = "┌─ image ".to_string() + &"─".repeat(width.saturating_sub(10)) + "┐";
    let bottom_border = "└".to_string() + &"─".repeat(width - 2) + "┘";

    println!("{}", style(&top_border).dim().green());
    for line in wrap_text(&label, width.saturating_sub(4)) {
        let padding = width.saturating_sub(console::measure_text_width(&line) + 3);
        println!("│ {}{}│", style(&line).bold().white(), " ".repeat(padding));
    }
    println!("{}", style(&bottom_border).dim().green());
}

pub fn display_generating(what: &str) {
    eprintln!("{} {}", style("⏳").bold().yellow(), style(what).dim());
}

pub fn display_saved(path: &Path) {
    println!(
        "{} {}",
        style("💾 Image saved to").bold().green(),
        style(path.display()).bold().white()
    );
}

/// One generic message for generation failures, the specific one for bad input.
pub fn display_error(err: &ChefError) {
    eprintln!(
        "\n{} {}",
        style("❌ Error:").bold().red(),
        style(err.user_message()).red()
    );
}
