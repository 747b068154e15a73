//! Cover against an area-effect origin.

use anyhow::Result;
use clap::Parser;
use console::style;
use cover_core::{CoverDetector, Position};

use super::{OutputFormat, print_result_summary};
use crate::input::SceneArgs;

/// Cover against an area-effect origin point
#[derive(Parser)]
pub struct Point {
    #[command(flatten)]
    input: SceneArgs,

    /// Origin x in scene pixels
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Origin y in scene pixels
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Origin elevation in feet
    #[arg(long, allow_negative_numbers = true)]
    elevation: Option<f64>,

    /// Id of the target token
    #[arg(short, long, value_name = "ID")]
    target: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Point {
    pub fn execute(self) -> Result<()> {
        let inputs = self.input.load()?;
        let target = inputs.entity(self.target)?;

        let mut origin = Position::new(self.x, self.y);
        if let Some(elevation) = self.elevation {
            origin = origin.with_elevation(elevation);
        }

        let result = CoverDetector::from_settings(&inputs.settings).detect_from_point(
            &inputs.env(),
            origin,
            target,
        );

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} ({}, {}) -> {}",
                    style("Origin:").bold().cyan(),
                    self.x,
                    self.y,
                    target.id
                );
                print_result_summary(&result);
            }
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "origin": { "x": self.x, "y": self.y, "elevation": self.elevation },
                    "target": target.id,
                    "result": result,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }

        Ok(())
    }
}
