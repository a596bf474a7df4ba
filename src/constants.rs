/// Number of questions requested per quiz batch
pub const QUIZ_BATCH_SIZE: usize = 5;

/// Answer options per quiz question
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Consecutive incorrect answers that trigger a learning-style switch
pub const STREAK_SWITCH_THRESHOLD: u32 = 3;

/// Confidence score assigned to a fresh profile
pub const STARTING_CONFIDENCE: u8 = 85;

/// Confidence gained per correct answer
pub const CONFIDENCE_CORRECT_BONUS: u8 = 1;

/// Confidence lost when a style switch fires
pub const CONFIDENCE_SWITCH_PENALTY: u8 = 25;

/// Upper bound of the confidence score
pub const MAX_CONFIDENCE: u8 = 100;

/// Total generation attempts, including the first
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// Extracted document text is truncated to this many characters
pub const MAX_EXTRACT_CHARS: usize = 50_000;
