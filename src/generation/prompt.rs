use serde_json::json;

use crate::constants::{OPTIONS_PER_QUESTION, QUIZ_BATCH_SIZE};
use crate::profile::LearningStyle;

/// Style-specific instruction for the study-aid path.
pub fn study_aid_instruction(style: LearningStyle) -> String {
    let style_directive = match style {
        LearningStyle::Visual => {
            "Present the material as heavily structured markdown: headings, \
             bulleted hierarchies and tables. Where a concept has spatial or \
             relational structure, describe a diagram the learner could draw."
        }
        LearningStyle::Practical => {
            "Ground every concept in at least three worked real-world examples. \
             Finish with one practice prompt the learner can attempt on their own."
        }
        LearningStyle::Conceptual => {
            "State the underlying principles explicitly before any detail, and \
             connect each principle to an analogy from everyday experience."
        }
    };

    format!(
        "You are a study coach preparing a study aid from the learner's own \
         material. Use only the provided content. {style_directive}"
    )
}

/// Instruction for the quiz path. The response is additionally constrained
/// by [`quiz_response_schema`].
pub fn quiz_instruction() -> String {
    format!(
        "Generate a multiple-choice quiz of exactly {QUIZ_BATCH_SIZE} questions \
         from the provided study material. Each question has exactly \
         {OPTIONS_PER_QUESTION} answer options, one correct answer, and one \
         explanation per learning style (visual, practical, conceptual). \
         Respond with JSON only."
    )
}

/// Declared output structure for the quiz path: an array of exactly
/// five question objects.
pub fn quiz_response_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "minItems": QUIZ_BATCH_SIZE,
        "maxItems": QUIZ_BATCH_SIZE,
        "items": {
            "type": "object",
            "properties": {
                "question": { "type": "string" },
                "options": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": OPTIONS_PER_QUESTION,
                    "maxItems": OPTIONS_PER_QUESTION
                },
                "correctAnswerIndex": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": OPTIONS_PER_QUESTION - 1
                },
                "explanations": {
                    "type": "object",
                    "properties": {
                        "visual": { "type": "string" },
                        "practical": { "type": "string" },
                        "conceptual": { "type": "string" }
                    },
                    "required": ["visual", "practical", "conceptual"]
                }
            },
            "required": ["question", "options", "correctAnswerIndex", "explanations"]
        }
    })
}
