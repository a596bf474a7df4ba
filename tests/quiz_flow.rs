mod common;

use common::{batch, MemoryStore, RecordingNotifier};
use studycoach::gate::SessionGate;
use studycoach::notify::SessionEvent;
use studycoach::profile::{LearningStyle, ProfileState};
use studycoach::quiz::{AdvanceOutcome, AnswerOutcome, AnswerStatus, EngineError, QuizEngine};

/// Full five-question run: one correct, a three-miss streak that switches
/// the style on advance, then a final correct answer into completion.
#[test]
fn adaptive_run_switches_style_and_completes() {
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let mut engine = QuizEngine::new(&store, &notifier, SessionGate::new());
    let mut profile = ProfileState::new(LearningStyle::Visual);

    engine.load_batch(batch(5)).unwrap();

    // Q1 correct.
    assert_eq!(
        engine.submit_answer(&mut profile, 0).unwrap(),
        AnswerOutcome::Correct { score: 1 }
    );
    assert_eq!(profile.confidence(), 86);
    engine.advance(&mut profile).unwrap();

    // Q2-Q4 incorrect.
    for expected_streak in 1..=3 {
        assert_eq!(
            engine.submit_answer(&mut profile, 1).unwrap(),
            AnswerOutcome::Incorrect {
                streak: expected_streak
            }
        );
        if expected_streak < 3 {
            assert_eq!(
                engine.advance(&mut profile).unwrap(),
                AdvanceOutcome::Advanced { switched_to: None }
            );
        }
    }

    // The explanation after the third miss previews the pending style.
    let explanation = engine.explanation_to_show(&profile).unwrap();
    assert_eq!(explanation.style, LearningStyle::Practical);

    // Advancing past Q4 fires the switch: style rotates, confidence drops
    // by 25 and the streak resets.
    assert_eq!(
        engine.advance(&mut profile).unwrap(),
        AdvanceOutcome::Advanced {
            switched_to: Some(LearningStyle::Practical)
        }
    );
    assert_eq!(profile.current_style(), LearningStyle::Practical);
    assert_eq!(profile.confidence(), 61);
    assert_eq!(engine.session().unwrap().consecutive_incorrect(), 0);
    assert_eq!(
        store.saved.lock().unwrap().as_slice(),
        &[LearningStyle::Practical]
    );

    // Q5 correct, then completion at 2/5.
    engine.submit_answer(&mut profile, 0).unwrap();
    assert_eq!(profile.confidence(), 62);
    assert_eq!(
        engine.advance(&mut profile).unwrap(),
        AdvanceOutcome::Completed { score: 2, total: 5 }
    );
    assert_eq!(engine.session().unwrap().status(), AnswerStatus::Completed);

    let events = notifier.events();
    assert!(events.contains(&SessionEvent::StyleSwitched {
        new_style: LearningStyle::Practical
    }));
    assert_eq!(
        events.last(),
        Some(&SessionEvent::QuizCompleted { score: 2, total: 5 })
    );
}

#[test]
fn completed_session_rejects_further_operations() {
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let mut engine = QuizEngine::new(&store, &notifier, SessionGate::new());
    let mut profile = ProfileState::new(LearningStyle::Visual);

    engine.load_batch(batch(2)).unwrap();
    for _ in 0..2 {
        engine.submit_answer(&mut profile, 0).unwrap();
        engine.advance(&mut profile).unwrap();
    }

    assert!(matches!(
        engine.advance(&mut profile),
        Err(EngineError::InvalidOperation(_))
    ));
    assert!(matches!(
        engine.submit_answer(&mut profile, 0),
        Err(EngineError::InvalidOperation(_))
    ));

    // Retake brings the same batch back to the top.
    engine.retake().unwrap();
    let session = engine.session().unwrap();
    assert_eq!(session.position(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.status(), AnswerStatus::Unanswered);
    assert_eq!(session.batch().len(), 2);
}

#[test]
fn switch_streaks_rotate_through_all_styles() {
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let mut engine = QuizEngine::new(&store, &notifier, SessionGate::new());
    let mut profile = ProfileState::new(LearningStyle::Visual);

    // 10 questions allow three full streaks of three misses.
    engine.load_batch(batch(10)).unwrap();
    let mut switches = Vec::new();
    for _ in 0..9 {
        engine.submit_answer(&mut profile, 1).unwrap();
        if let AdvanceOutcome::Advanced {
            switched_to: Some(style),
        } = engine.advance(&mut profile).unwrap()
        {
            switches.push(style);
        }
    }

    assert_eq!(
        switches,
        vec![
            LearningStyle::Practical,
            LearningStyle::Conceptual,
            LearningStyle::Visual
        ]
    );
    // 85 - 25 - 25 - 25, clamped at each step.
    assert_eq!(profile.confidence(), 10);
}

#[test]
fn load_batch_replaces_running_session() {
    let store = MemoryStore::default();
    let notifier = RecordingNotifier::default();
    let mut engine = QuizEngine::new(&store, &notifier, SessionGate::new());
    let mut profile = ProfileState::new(LearningStyle::Visual);

    engine.load_batch(batch(3)).unwrap();
    engine.submit_answer(&mut profile, 0).unwrap();
    engine.advance(&mut profile).unwrap();

    engine.load_batch(batch(5)).unwrap();
    let session = engine.session().unwrap();
    assert_eq!(session.position(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.batch().len(), 5);
}
