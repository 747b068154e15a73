//! Post-evaluation adjustment hooks.
//!
//! Hosts register hooks to raise or lower a finished result, typically for
//! cross-floor adjacency the planar model cannot see. Hooks run in priority
//! order (lower first), each receiving the result of the previous one.

use std::sync::Arc;

use crate::result::CoverResult;
use crate::state::{CoverCategory, Entity};

/// Which detector path produced the result a hook is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DetectionPath {
    /// No wall crossed the center line; token evaluators ran.
    Tokens,
    /// A wall crossed the center line.
    Walls,
}

/// Read-only view handed to each hook.
#[derive(Clone, Copy, Debug)]
pub struct AdjustmentContext<'a> {
    pub attacker: &'a Entity,
    pub target: &'a Entity,
    pub path: DetectionPath,
}

/// Adjusts a finished cover result.
pub trait CoverAdjustmentHook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the category to use from here on. Returning `current`
    /// leaves the result untouched.
    fn adjust(&self, ctx: &AdjustmentContext<'_>, current: CoverCategory) -> CoverCategory;
}

/// Runs `hooks` (already sorted) over `result`.
pub(crate) fn run_hooks(
    hooks: &[Arc<dyn CoverAdjustmentHook>],
    ctx: &AdjustmentContext<'_>,
    mut result: CoverResult,
) -> CoverResult {
    for hook in hooks {
        let adjusted = hook.adjust(ctx, result.category);
        if adjusted != result.category {
            tracing::debug!(hook = hook.name(), from = %result.category, to = %adjusted, "cover adjusted");
            result = result.with_category(adjusted);
        }
    }
    result
}
