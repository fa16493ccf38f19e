//! Multi-Dimensional Scorer
//!
//! Scores one structured payload against a four-dimension rubric. Every
//! dimension is worth 25 points; the composite is their sum. Scoring is a pure
//! function of `(content, context)`: no I/O, no clock, no randomness, and both
//! inputs are only borrowed.
//!
//! The built-in dimensions read a go-to-market strategy payload (`tiers`,
//! `channels`, `launch_timeline`) and a venture brief context. Missing or
//! malformed fields earn zero credit; nothing in this module can fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod actionability;
pub mod alignment;
pub mod consistency;
pub(crate) mod fields;
pub mod specificity;
pub(crate) mod terms;

pub use actionability::Actionability;
pub use alignment::Alignment;
pub use consistency::InternalConsistency;
pub use specificity::Specificity;

/// Point budget of a single dimension.
pub const DIMENSION_BUDGET: u8 = 25;

/// Upper bound of a composite score.
pub const COMPOSITE_MAX: u8 = DIMENSION_BUDGET * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Specificity,
    Actionability,
    Alignment,
    InternalConsistency,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 4] = [
        DimensionKind::Specificity,
        DimensionKind::Actionability,
        DimensionKind::Alignment,
        DimensionKind::InternalConsistency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DimensionKind::Specificity => "specificity",
            DimensionKind::Actionability => "actionability",
            DimensionKind::Alignment => "alignment",
            DimensionKind::InternalConsistency => "internal_consistency",
        }
    }
}

/// One clamped subscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub kind: DimensionKind,
    pub points: u8,
}

/// Sum of the four dimension scores of one successful attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    specificity: u8,
    actionability: u8,
    alignment: u8,
    internal_consistency: u8,
    total: u8,
}

impl CompositeScore {
    /// Builds a composite from already-computed subscores. Each subscore is
    /// clamped to the dimension budget, so `total` never exceeds 100.
    pub fn from_dimensions(
        specificity: u8,
        actionability: u8,
        alignment: u8,
        internal_consistency: u8,
    ) -> Self {
        let specificity = specificity.min(DIMENSION_BUDGET);
        let actionability = actionability.min(DIMENSION_BUDGET);
        let alignment = alignment.min(DIMENSION_BUDGET);
        let internal_consistency = internal_consistency.min(DIMENSION_BUDGET);
        Self {
            specificity,
            actionability,
            alignment,
            internal_consistency,
            total: specificity + actionability + alignment + internal_consistency,
        }
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn get(&self, kind: DimensionKind) -> u8 {
        match kind {
            DimensionKind::Specificity => self.specificity,
            DimensionKind::Actionability => self.actionability,
            DimensionKind::Alignment => self.alignment,
            DimensionKind::InternalConsistency => self.internal_consistency,
        }
    }

    pub fn dimensions(&self) -> [DimensionScore; 4] {
        DimensionKind::ALL.map(|kind| DimensionScore {
            kind,
            points: self.get(kind),
        })
    }
}

/// A rubric dimension producing an unclamped raw credit.
///
/// Implementations sum weighted group credits whose caps total
/// [`DIMENSION_BUDGET`]; the rubric rounds and clamps the result.
pub trait Dimension: Send + Sync {
    fn evaluate(&self, content: &Value, context: &Value) -> f64;
}

/// Anything that can turn `(content, context)` into a composite score.
pub trait Scorer: Send + Sync {
    fn score(&self, content: &Value, context: &Value) -> CompositeScore;
}

/// The fixed four-dimension rubric.
pub struct Rubric {
    specificity: Box<dyn Dimension>,
    actionability: Box<dyn Dimension>,
    alignment: Box<dyn Dimension>,
    internal_consistency: Box<dyn Dimension>,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            specificity: Box::new(Specificity),
            actionability: Box::new(Actionability),
            alignment: Box::new(Alignment),
            internal_consistency: Box::new(InternalConsistency),
        }
    }
}

impl Rubric {
    /// Swap the implementation behind one dimension slot.
    pub fn with_dimension(mut self, kind: DimensionKind, dimension: Box<dyn Dimension>) -> Self {
        match kind {
            DimensionKind::Specificity => self.specificity = dimension,
            DimensionKind::Actionability => self.actionability = dimension,
            DimensionKind::Alignment => self.alignment = dimension,
            DimensionKind::InternalConsistency => self.internal_consistency = dimension,
        }
        self
    }
}

impl Scorer for Rubric {
    fn score(&self, content: &Value, context: &Value) -> CompositeScore {
        CompositeScore::from_dimensions(
            clamp_dimension(self.specificity.evaluate(content, context)),
            clamp_dimension(self.actionability.evaluate(content, context)),
            clamp_dimension(self.alignment.evaluate(content, context)),
            clamp_dimension(self.internal_consistency.evaluate(content, context)),
        )
    }
}

/// Score with the default rubric.
pub fn score(content: &Value, context: &Value) -> CompositeScore {
    Rubric::default().score(content, context)
}

/// `max(0, min(25, round(raw)))`; non-finite input earns nothing.
pub fn clamp_dimension(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, f64::from(DIMENSION_BUDGET)) as u8
}

/// `cap * min(1, earned / possible)`; zero when nothing was possible.
pub(crate) fn group_credit(cap: f64, earned: f64, possible: f64) -> f64 {
    if possible <= 0.0 || earned <= 0.0 {
        return 0.0;
    }
    cap * (earned / possible).min(1.0)
}
