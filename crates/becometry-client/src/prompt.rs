//! The "create an account" upgrade prompt.
//!
//! A two-state machine that is edge-triggered on favorite-add events, never
//! level-triggered on the current count: a dismissed prompt must not reopen
//! just because the guest still sits at the cap. Only a fresh add event (a
//! backend `needsAccount` rejection or a successful add that lands exactly on
//! the cap) shows it again.

/// Visibility state of the upgrade prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    #[default]
    Hidden,
    Shown,
}

/// Decides when the "create an account" call-to-action is visible.
#[derive(Debug, Default)]
pub struct UpgradePrompt {
    state: PromptState,
}

impl UpgradePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == PromptState::Shown
    }

    /// An `add` was rejected with `needsAccount` (backend cap) or by the
    /// local cache cap.
    pub fn limit_rejected(&mut self) {
        self.state = PromptState::Shown;
    }

    /// A guest `add` succeeded, leaving the guest at `count` favorites out of
    /// a cap of `limit`. Shows the prompt only when the count lands exactly
    /// on the cap, which makes the transition edge-triggered.
    pub fn successful_add(&mut self, count: usize, limit: usize) {
        if count == limit {
            self.state = PromptState::Shown;
        }
    }

    /// Explicit user dismissal.
    pub fn dismiss(&mut self) {
        self.state = PromptState::Hidden;
    }

    /// Login or registration completed; the prompt's purpose is fulfilled.
    pub fn authenticated(&mut self) {
        self.state = PromptState::Hidden;
    }
}
