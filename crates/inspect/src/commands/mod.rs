//! Command implementations for cover-inspect
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod matrix;
mod pair;
mod point;

pub use matrix::Matrix;
pub use pair::Pair;
pub use point::Point;

use console::style;
use cover_core::{CoverCategory, CoverResult};

/// Output format shared by the single-result commands.
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

/// Category name colored by strength.
pub fn styled_category(category: CoverCategory) -> String {
    let label = category.to_string();
    match category {
        CoverCategory::None => style(label).dim().to_string(),
        CoverCategory::Lesser => style(label).yellow().to_string(),
        CoverCategory::Standard => style(label).green().to_string(),
        CoverCategory::Greater => style(label).green().bold().to_string(),
    }
}

pub fn print_result_summary(result: &CoverResult) {
    println!("{} {}", style("Cover:").bold().cyan(), styled_category(result.category));
    println!(
        "{} AC +{}, Reflex +{}, Stealth +{}",
        style("Bonuses:").bold().cyan(),
        result.bonuses.ac,
        result.bonuses.reflex,
        result.bonuses.stealth
    );
    println!("{} {}", style("Can Hide:").bold().cyan(), result.can_hide);

    if let Some(provenance) = &result.override_provenance {
        let original = provenance
            .original
            .map_or_else(|| String::from("-"), |category| category.to_string());
        println!(
            "{} {} (was {}{})",
            style("Adjusted By:").bold().yellow(),
            provenance.source,
            original,
            if result.is_override { ", override" } else { "" }
        );
    }
}
