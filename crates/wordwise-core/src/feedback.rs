use std::time::{Duration, Instant};

use serde::Serialize;

use crate::view::CopyKey;

pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Handle for one scheduled expiry. Only the newest ticket can clear the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTicket {
    pub key: CopyKey,
    pub generation: u64,
    pub expires_at: Instant,
}

/// Which field shows the "copied" marker. At most one at a time.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackState {
    active_key: Option<CopyKey>,
    #[serde(skip)]
    expires_at: Option<Instant>,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    window: Duration,
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_FEEDBACK)
    }
}

impl FeedbackState {
    pub fn new(window: Duration) -> Self {
        Self {
            active_key: None,
            expires_at: None,
            generation: 0,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn active_key(&self) -> Option<&CopyKey> {
        self.active_key.as_ref()
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_copied(&self, key: &CopyKey) -> bool {
        self.active_key.as_ref() == Some(key)
    }

    /// Mark `key` as copied, superseding whatever was marked before.
    pub fn mark_copied(&mut self, key: CopyKey, now: Instant) -> CopyTicket {
        self.generation += 1;
        let expires_at = now + self.window;
        self.active_key = Some(key.clone());
        self.expires_at = Some(expires_at);

        CopyTicket {
            key,
            generation: self.generation,
            expires_at,
        }
    }

    /// Clear the marker if `ticket` is still the latest one. Stale tickets are ignored.
    pub fn on_expire(&mut self, ticket: &CopyTicket) -> bool {
        if ticket.generation != self.generation || self.active_key.is_none() {
            tracing::trace!(key = %ticket.key, "ignoring stale copy expiry");
            return false;
        }
        self.active_key = None;
        self.expires_at = None;
        true
    }

    /// Clear the marker if its deadline has passed; for callers that poll.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.active_key = None;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn expiry_clears_marker() {
        let mut feedback = FeedbackState::default();
        let t0 = Instant::now();
        let ticket = feedback.mark_copied(CopyKey::Translation, t0);

        assert!(feedback.is_copied(&CopyKey::Translation));
        assert_eq!(ticket.expires_at, t0 + ms(2000));

        assert!(feedback.on_expire(&ticket));
        assert_eq!(feedback.active_key(), None);
    }

    #[test]
    fn newer_copy_survives_older_expiry() {
        let mut feedback = FeedbackState::default();
        let t0 = Instant::now();
        let first = feedback.mark_copied(CopyKey::SourceWord, t0);
        let second = feedback.mark_copied(CopyKey::Meaning, t0 + ms(500));

        // first window elapses
        assert!(!feedback.on_expire(&first));
        assert_eq!(feedback.active_key(), Some(&CopyKey::Meaning));
        assert!(!feedback.tick(t0 + ms(2000)));

        assert_eq!(second.expires_at, t0 + ms(2500));
        assert!(feedback.tick(t0 + ms(2500)));
        assert_eq!(feedback.active_key(), None);
    }

    #[test]
    fn recopying_same_key_restarts_window() {
        let mut feedback = FeedbackState::default();
        let t0 = Instant::now();
        let first = feedback.mark_copied(CopyKey::Example(1), t0);
        let second = feedback.mark_copied(CopyKey::Example(1), t0 + ms(1000));

        assert!(!feedback.on_expire(&first));
        assert!(feedback.is_copied(&CopyKey::Example(1)));
        assert!(feedback.on_expire(&second));
    }

    #[test]
    fn tick_before_deadline_keeps_marker() {
        let mut feedback = FeedbackState::new(ms(100));
        let t0 = Instant::now();
        feedback.mark_copied(CopyKey::Output, t0);
        assert!(!feedback.tick(t0 + ms(99)));
        assert!(feedback.is_copied(&CopyKey::Output));
    }
}
