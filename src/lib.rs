//! Adaptive study-aid generation and quiz engine.
//!
//! The crate covers the stateful core of a study application: a
//! [`generation::GenerationClient`] that produces study aids and quiz
//! batches from an external generative service, a [`session::StudyAidSession`]
//! that sequences extraction and generation, and a [`quiz::QuizEngine`] that
//! scores answers, tracks incorrect streaks and rotates the learner's
//! [`profile::LearningStyle`] when a streak signals sustained difficulty.

pub mod config;
pub mod constants;
pub mod extract;
pub mod gate;
pub mod generation;
pub mod logging;
pub mod notify;
pub mod profile;
pub mod quiz;
pub mod session;
pub mod store;
