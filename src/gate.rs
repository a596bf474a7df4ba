use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks the logical session busy while a generation call is suspended on
/// network I/O. Mutating operations check the gate and fail fast instead of
/// queueing behind an in-flight request.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    busy: Arc<AtomicBool>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for the duration of the returned guard. Returns `None`
    /// when another operation already holds it.
    pub fn claim(&self) -> Option<GateGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[must_use = "the gate is released when the guard drops"]
#[derive(Debug)]
pub struct GateGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_exclusive() {
        let gate = SessionGate::new();
        let guard = gate.claim().expect("first claim");
        assert!(gate.is_busy());
        assert!(gate.claim().is_none());
        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.claim().is_some());
    }

    #[test]
    fn clones_share_state() {
        let gate = SessionGate::new();
        let other = gate.clone();
        let _guard = gate.claim().expect("claim");
        assert!(other.is_busy());
        assert!(other.claim().is_none());
    }
}
