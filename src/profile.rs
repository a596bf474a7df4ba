use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CONFIDENCE_CORRECT_BONUS, CONFIDENCE_SWITCH_PENALTY, MAX_CONFIDENCE, STARTING_CONFIDENCE,
};

/// The three learner-preference categories. The cyclic order is fixed:
/// visual → practical → conceptual → visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Practical,
    Conceptual,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 3] = [Self::Visual, Self::Practical, Self::Conceptual];

    /// Next style in the fixed cyclic rotation.
    pub fn next(self) -> Self {
        match self {
            Self::Visual => Self::Practical,
            Self::Practical => Self::Conceptual,
            Self::Conceptual => Self::Visual,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Practical => "practical",
            Self::Conceptual => "conceptual",
        }
    }

    /// Human-readable label used on generated artifacts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Practical => "Practical",
            Self::Conceptual => "Conceptual",
        }
    }
}

impl Default for LearningStyle {
    fn default() -> Self {
        Self::Visual
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown learning style: {0}")]
pub struct UnknownStyle(String);

impl FromStr for LearningStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "practical" => Ok(Self::Practical),
            "conceptual" => Ok(Self::Conceptual),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

/// Learner profile: active style plus a bounded confidence score.
///
/// Confidence stays within `[0, 100]` after every mutation; both fields are
/// mutated exclusively through the methods below so the bound cannot be
/// violated from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    current_style: LearningStyle,
    confidence: u8,
}

impl ProfileState {
    pub fn new(style: LearningStyle) -> Self {
        Self {
            current_style: style,
            confidence: STARTING_CONFIDENCE,
        }
    }

    pub fn current_style(&self) -> LearningStyle {
        self.current_style
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    /// Confidence bump for a correct answer, saturating at the upper bound.
    pub fn bump_confidence(&mut self) {
        self.confidence = (self.confidence + CONFIDENCE_CORRECT_BONUS).min(MAX_CONFIDENCE);
    }

    /// Rotate to the next style and apply the switch penalty in one step,
    /// so no intermediate state is observable.
    pub fn switch_to_next(&mut self) -> LearningStyle {
        self.current_style = self.current_style.next();
        self.confidence = self.confidence.saturating_sub(CONFIDENCE_SWITCH_PENALTY);
        self.current_style
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new(LearningStyle::default())
    }
}

#[derive(Debug, Error)]
#[error("preference store failure: {0}")]
pub struct ProfileStoreError(pub String);

/// Persistence seam for the style preference. `load` falls back to the
/// default style when nothing usable is stored; `save` is invoked only on
/// a style-switch transition.
pub trait ProfileStore {
    fn load(&self) -> LearningStyle;
    fn save(&self, style: LearningStyle) -> Result<(), ProfileStoreError>;
}

impl<T: ProfileStore> ProfileStore for &T {
    fn load(&self) -> LearningStyle {
        (**self).load()
    }

    fn save(&self, style: LearningStyle) -> Result<(), ProfileStoreError> {
        (**self).save(style)
    }
}
