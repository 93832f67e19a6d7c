//! Pattern Sequencer
//!
//! Expands a repetition rule into a per-bar template assignment and sums the
//! resulting conveyor capacity.
//!
//! | Mode         | Position `p` (1-indexed) gets secondary when |
//! |--------------|----------------------------------------------|
//! | `AllSame`    | never                                        |
//! | `Alternating`| `p` is even                                  |
//! | `Interval`   | `p % every == 0`                             |
//!
//! In every mode a missing secondary id falls back to the primary. The
//! assignment is a pure function of position, so sequences need no
//! iteration state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default interval for [`PatternMode::Interval`]
pub const DEFAULT_INTERVAL: u32 = 4;

/// Smallest meaningful interval
pub const MIN_INTERVAL: u32 = 2;

/// Repetition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatternMode {
    #[default]
    AllSame,
    Alternating,
    Interval,
}

/// Which template a bar position receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarRole {
    Primary,
    Secondary,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

/// Pattern definition.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "Interval",
///   "primary_template_id": "ceramic-6",
///   "secondary_template_id": "neo-4",
///   "interval_count": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default)]
    pub mode: PatternMode,
    /// Required. An empty id is reported by [`PatternConfig::validate`].
    pub primary_template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_template_id: Option<String>,
    #[serde(default = "default_interval")]
    pub interval_count: u32,
}

impl PatternConfig {
    /// Every bar gets `primary`
    pub fn all_same(primary: impl Into<String>) -> Self {
        PatternConfig {
            mode: PatternMode::AllSame,
            primary_template_id: primary.into(),
            secondary_template_id: None,
            interval_count: DEFAULT_INTERVAL,
        }
    }

    /// Odd positions primary, even positions secondary
    pub fn alternating(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        PatternConfig {
            mode: PatternMode::Alternating,
            primary_template_id: primary.into(),
            secondary_template_id: Some(secondary.into()),
            interval_count: DEFAULT_INTERVAL,
        }
    }

    /// Secondary on every `every`-th position
    pub fn interval(primary: impl Into<String>, secondary: impl Into<String>, every: u32) -> Self {
        PatternConfig {
            mode: PatternMode::Interval,
            primary_template_id: primary.into(),
            secondary_template_id: Some(secondary.into()),
            interval_count: every,
        }
    }

    fn has_secondary(&self) -> bool {
        self.secondary_template_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    /// Interval actually used: never below [`MIN_INTERVAL`]
    pub fn effective_interval(&self) -> u32 {
        self.interval_count.max(MIN_INTERVAL)
    }

    /// Role of a 1-indexed bar position. Position 0 is treated as primary.
    pub fn role_at(&self, position: u32) -> BarRole {
        if position == 0 || !self.has_secondary() {
            return BarRole::Primary;
        }
        let secondary = match self.mode {
            PatternMode::AllSame => false,
            PatternMode::Alternating => position % 2 == 0,
            PatternMode::Interval => position % self.effective_interval() == 0,
        };
        if secondary {
            BarRole::Secondary
        } else {
            BarRole::Primary
        }
    }

    /// Template id for a role, falling back to the primary
    pub fn template_for(&self, role: BarRole) -> &str {
        match role {
            BarRole::Secondary if self.has_secondary() => self
                .secondary_template_id
                .as_deref()
                .unwrap_or(&self.primary_template_id),
            _ => &self.primary_template_id,
        }
    }

    /// Structural and advisory findings for this pattern.
    pub fn validate(&self) -> Vec<PatternIssue> {
        let mut issues = Vec::new();
        if self.primary_template_id.trim().is_empty() {
            issues.push(PatternIssue::PrimaryMissing);
        }
        let needs_secondary = matches!(self.mode, PatternMode::Alternating | PatternMode::Interval);
        if needs_secondary && !self.has_secondary() {
            issues.push(PatternIssue::SecondaryMissing { mode: self.mode });
        }
        if self.mode == PatternMode::Interval && self.interval_count < MIN_INTERVAL {
            issues.push(PatternIssue::IntervalClamped {
                requested: self.interval_count,
                used: MIN_INTERVAL,
            });
        }
        issues
    }
}

/// Problems found in a pattern or while aggregating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue")]
pub enum PatternIssue {
    /// No primary template id. Blocks a meaningful result.
    PrimaryMissing,
    /// Mode expects a secondary but none given; result is uniform.
    SecondaryMissing { mode: PatternMode },
    /// Interval below the minimum was raised.
    IntervalClamped { requested: u32, used: u32 },
    /// A template id could not be resolved to a capacity.
    TemplateNotFound { template_id: String },
}

impl PatternIssue {
    /// Errors block the result; everything else is advisory
    pub fn is_error(&self) -> bool {
        matches!(self, PatternIssue::PrimaryMissing | PatternIssue::TemplateNotFound { .. })
    }
}

/// Expanded sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSequence {
    /// Role of each bar, index 0 = position 1
    pub sequence: Vec<BarRole>,
    pub primary_count: u32,
    pub secondary_count: u32,
}

/// Expand a pattern over `total_bars` positions.
///
/// ```rust
/// use conveyor_core::bars::{apply_pattern, BarRole, PatternConfig};
///
/// let pattern = PatternConfig::interval("A", "B", 4);
/// let result = apply_pattern(&pattern, 12);
///
/// assert_eq!(result.secondary_count, 3);
/// assert_eq!(result.sequence[3], BarRole::Secondary);
/// ```
pub fn apply_pattern(config: &PatternConfig, total_bars: u32) -> PatternSequence {
    let sequence: Vec<BarRole> = (1..=total_bars).map(|p| config.role_at(p)).collect();
    let secondary_count = sequence.iter().filter(|r| **r == BarRole::Secondary).count() as u32;

    PatternSequence {
        primary_count: total_bars - secondary_count,
        secondary_count,
        sequence,
    }
}

/// Capacity of a whole conveyor under a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCapacity {
    pub total_capacity_lb: f64,
    /// total / bar count, 0 when there are no bars
    pub average_capacity_lb: f64,
    pub primary_count: u32,
    pub secondary_count: u32,
    pub issues: Vec<PatternIssue>,
}

/// Sum template capacities over every bar position.
///
/// `capacity_of` resolves a template id to one bar's capacity; each id is
/// resolved at most once per call. Unresolvable ids contribute 0 and add a
/// [`PatternIssue::TemplateNotFound`].
pub fn aggregate_pattern_capacity<F>(
    config: &PatternConfig,
    total_bars: u32,
    mut capacity_of: F,
) -> PatternCapacity
where
    F: FnMut(&str) -> Option<f64>,
{
    let mut issues = config.validate();
    let expanded = apply_pattern(config, total_bars);

    let mut cache: HashMap<String, Option<f64>> = HashMap::new();
    let mut total_capacity_lb = 0.0;

    for role in &expanded.sequence {
        let id = config.template_for(*role);
        let capacity = match cache.get(id) {
            Some(cached) => *cached,
            None => {
                let resolved = capacity_of(id);
                if resolved.is_none() {
                    warn!(template_id = id, "pattern template has no capacity");
                    issues.push(PatternIssue::TemplateNotFound {
                        template_id: id.to_string(),
                    });
                }
                cache.insert(id.to_string(), resolved);
                resolved
            }
        };
        total_capacity_lb += capacity.unwrap_or(0.0);
    }

    let average_capacity_lb = if total_bars > 0 {
        total_capacity_lb / total_bars as f64
    } else {
        0.0
    };

    PatternCapacity {
        total_capacity_lb,
        average_capacity_lb,
        primary_count: expanded.primary_count,
        secondary_count: expanded.secondary_count,
        issues,
    }
}
