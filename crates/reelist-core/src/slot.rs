use tokio_util::sync::CancellationToken;

/// Coordination state for one logical request channel (search or detail).
///
/// Only the most recent request for a slot may ever land: beginning a new
/// request cancels the previous token and bumps the generation, and any
/// outcome carrying a stale generation is discarded by the caller, even a
/// successful one.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl RequestSlot {
    pub fn begin(&mut self) -> (u64, CancellationToken) {
        self.cancel_pending();
        self.generation += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        (self.generation, token)
    }

    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_supersedes_previous_request() {
        let mut slot = RequestSlot::default();
        let (gen1, token1) = slot.begin();
        let (gen2, token2) = slot.begin();

        assert!(token1.is_cancelled());
        assert!(!token2.is_cancelled());
        assert!(!slot.is_current(gen1));
        assert!(slot.is_current(gen2));
    }

    #[test]
    fn cancel_pending_is_safe_when_idle() {
        let mut slot = RequestSlot::default();
        slot.cancel_pending();

        let (generation, token) = slot.begin();
        slot.cancel_pending();
        assert!(token.is_cancelled());
        // The generation is unchanged; a late result for it is still current
        // but carries a Cancelled outcome, which callers ignore.
        assert!(slot.is_current(generation));
    }
}
