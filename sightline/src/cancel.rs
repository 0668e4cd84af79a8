use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation handle for an in-flight sight resolution.
///
/// Clones share one flag, so a UI thread can hold a clone while the
/// resolver polls another. The resolver checks the flag once per chunk
/// rather than per sample; an in-flight provider request is allowed to
/// finish, and its chunk to be evaluated, before cancellation takes
/// effect. Callers needing a tighter bound must also cancel the
/// underlying request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::CancelToken;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
