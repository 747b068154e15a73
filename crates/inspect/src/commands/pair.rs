//! Cover for a single attacker/target pair.

use anyhow::Result;
use clap::Parser;
use console::style;
use cover_core::CoverDetector;

use super::{OutputFormat, print_result_summary};
use crate::input::SceneArgs;

/// Cover for one attacker/target pair
#[derive(Parser)]
pub struct Pair {
    #[command(flatten)]
    input: SceneArgs,

    /// Id of the attacking token
    #[arg(short, long, value_name = "ID")]
    attacker: u32,

    /// Id of the target token
    #[arg(short, long, value_name = "ID")]
    target: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Pair {
    pub fn execute(self) -> Result<()> {
        let inputs = self.input.load()?;
        let attacker = inputs.entity(self.attacker)?;
        let target = inputs.entity(self.target)?;

        let detector = CoverDetector::from_settings(&inputs.settings);
        let result = detector.detect_between_tokens(&inputs.env(), attacker, target);
        let upgrade = detector.take_feat_upgrade(attacker.id, target.id);

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {} -> {} ({})",
                    style("Pair:").bold().cyan(),
                    attacker.id,
                    target.id,
                    inputs.settings.intersection_mode
                );
                print_result_summary(&result);
                if let Some(record) = upgrade {
                    println!(
                        "{} {} raised {} to {}",
                        style("Feat:").bold().yellow(),
                        record.reason,
                        record.from,
                        record.to
                    );
                }
            }
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "attacker": attacker.id,
                    "target": target.id,
                    "mode": inputs.settings.intersection_mode,
                    "result": result,
                    "feat_upgrade": upgrade.map(|record| serde_json::json!({
                        "from": record.from,
                        "to": record.to,
                        "reason": record.reason,
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }

        Ok(())
    }
}
