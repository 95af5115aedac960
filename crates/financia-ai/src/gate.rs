use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::AiError;

/// In-flight flag refusing a second request of the same kind until the first
/// one finishes.
#[derive(Debug, Clone)]
pub struct RequestGate {
    label: &'static str,
    busy: Arc<AtomicBool>,
}

impl RequestGate {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claims the gate. The returned guard releases it on drop and may be moved
    /// to another thread.
    pub fn try_acquire(&self) -> Result<GateGuard, AiError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| GateGuard {
                busy: Arc::clone(&self.busy),
            })
            .map_err(|_| AiError::Busy(self.label))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

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
    fn second_acquire_is_refused_until_release() {
        let gate = RequestGate::new("insight");
        let guard = gate.try_acquire().expect("first acquire");
        assert!(gate.is_busy());
        assert!(matches!(gate.try_acquire(), Err(AiError::Busy("insight"))));
        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }

    #[test]
    fn guard_released_from_another_thread() {
        let gate = RequestGate::new("parse");
        let guard = gate.try_acquire().expect("acquire");
        std::thread::spawn(move || drop(guard))
            .join()
            .expect("join");
        assert!(!gate.is_busy());
    }
}
