//! Cover for every ordered pair of creatures.

use anyhow::Result;
use clap::Parser;
use console::style;
use cover_core::{CoverCategory, CoverDetector, Entity};

use super::styled_category;
use crate::input::SceneArgs;

/// Cover for every ordered pair of creatures in the scene
#[derive(Parser)]
pub struct Matrix {
    #[command(flatten)]
    input: SceneArgs,

    /// Only list pairs with at least this much cover
    #[arg(long, value_name = "CATEGORY", default_value = "none", value_parser = parse_category)]
    min: CoverCategory,
}

fn parse_category(value: &str) -> Result<CoverCategory, String> {
    value
        .parse()
        .map_err(|_| format!("unknown category '{value}' (expected none, lesser, standard or greater)"))
}

impl Matrix {
    pub fn execute(self) -> Result<()> {
        let inputs = self.input.load()?;
        let env = inputs.env();
        let detector = CoverDetector::from_settings(&inputs.settings);

        let creatures: Vec<&Entity> = inputs
            .scene
            .entities
            .iter()
            .filter(|entity| entity.is_creature())
            .collect();

        println!(
            "{} {} ({} creatures, {})",
            style("Scene:").bold().cyan(),
            self.input.scene_path().display(),
            creatures.len(),
            inputs.settings.intersection_mode
        );
        println!();

        let mut listed = 0usize;
        for attacker in &creatures {
            for target in &creatures {
                if attacker.id == target.id {
                    continue;
                }
                let result = detector.detect_between_tokens(&env, attacker, target);
                if result.category < self.min {
                    continue;
                }
                listed += 1;

                let marker = match (&result.override_provenance, result.is_override) {
                    (Some(provenance), true) => format!("  [override: {}]", provenance.source),
                    (Some(provenance), false) => format!("  [{}]", provenance.source),
                    (None, _) => String::new(),
                };
                println!(
                    "  {:>8} -> {:<8} {}{}",
                    attacker.id.to_string(),
                    target.id.to_string(),
                    styled_category(result.category),
                    marker
                );
            }
        }

        tracing::debug!(listed, "matrix done");

        println!();
        println!("{} {}", style("Pairs listed:").bold().cyan(), listed);
        Ok(())
    }
}
