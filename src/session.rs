//! Session & reset state (C5): current diagnostic mode, the S3
//! session-timeout clock, and the deferred hard-reset latch. The P2 timer
//! lives on [`crate::instance::Instance`] directly since it is refreshed
//! from several call sites outside this module (every inbound request and
//! every outbound response, §4.10).

use crate::session_type::SessionType;
use crate::wire::time_after;

#[derive(Debug)]
pub struct SessionState {
    diag_mode: SessionType,
    s3_deadline: u32,
}

impl SessionState {
    #[must_use]
    pub fn new(now_ms: u32, s3_ms: u32) -> Self {
        Self {
            diag_mode: SessionType::Default,
            s3_deadline: now_ms.wrapping_add(s3_ms),
        }
    }

    #[must_use]
    pub fn diag_mode(&self) -> SessionType {
        self.diag_mode
    }

    pub fn set_diag_mode(&mut self, mode: SessionType) {
        self.diag_mode = mode;
    }

    /// Refresh the S3 deadline, e.g. on TesterPresent or any other service
    /// activity that should keep the session alive.
    pub fn refresh_s3(&mut self, now_ms: u32, s3_ms: u32) {
        self.s3_deadline = now_ms.wrapping_add(s3_ms);
    }

    /// Demote to `Default` if the S3 deadline has passed. The design leaves
    /// open whether anything beyond the session mode should reset on S3
    /// expiry (§9 open question); this core resets mode only, matching the
    /// original source.
    pub fn tick(&mut self, now_ms: u32) {
        if time_after(self.s3_deadline, now_ms) {
            self.diag_mode = SessionType::Default;
        }
    }
}

/// Deferred ECUReset: arming the latch does not reset the ECU immediately —
/// it schedules `userHardReset()` 100 ms out, so the positive response has
/// time to leave the wire first (§4.4, §4.10).
#[derive(Debug, Default)]
pub struct ResetLatch {
    requested: bool,
    deadline: u32,
}

impl ResetLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.requested
    }

    /// Arm the latch for `now_ms + 100ms`. A no-op if already armed — the
    /// design calls for this to happen only once per reset request.
    pub fn arm(&mut self, now_ms: u32) {
        if !self.requested {
            self.requested = true;
            self.deadline = now_ms.wrapping_add(100);
        }
    }

    /// Whether the 100ms deferral has elapsed and `userHardReset()` should
    /// fire now.
    #[must_use]
    pub fn due(&self, now_ms: u32) -> bool {
        self.requested && time_after(self.deadline, now_ms)
    }

    pub fn clear(&mut self) {
        self.requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_default() {
        let session = SessionState::new(0, 5000);
        assert_eq!(session.diag_mode(), SessionType::Default);
    }

    #[test]
    fn s3_expiry_demotes_to_default() {
        let mut session = SessionState::new(0, 100);
        session.set_diag_mode(SessionType::Extended);
        session.tick(50);
        assert_eq!(session.diag_mode(), SessionType::Extended);
        session.tick(150);
        assert_eq!(session.diag_mode(), SessionType::Default);
    }

    #[test]
    fn s3_refresh_postpones_expiry() {
        let mut session = SessionState::new(0, 100);
        session.set_diag_mode(SessionType::Programming);
        session.refresh_s3(90, 100);
        session.tick(150);
        assert_eq!(session.diag_mode(), SessionType::Programming);
    }

    #[test]
    fn reset_latch_arms_once() {
        let mut latch = ResetLatch::new();
        latch.arm(1000);
        assert!(latch.is_armed());
        assert!(!latch.due(1050));
        assert!(latch.due(1101));

        latch.arm(5000);
        assert!(latch.due(1101));
    }

    #[test]
    fn reset_latch_clears() {
        let mut latch = ResetLatch::new();
        latch.arm(0);
        latch.clear();
        assert!(!latch.is_armed());
        assert!(!latch.due(1_000_000));
    }
}
