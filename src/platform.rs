//! Injected platform services.
//!
//! Capability helpers (screen-reader announcement, speech synthesis, the
//! clock, structured storage) never touch browser or OS APIs directly;
//! they go through this trait so the pipeline and its tests run against
//! plain in-memory doubles.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Host-provided ambient services available to synthesized components.
pub trait Platform {
    /// Queue a screen-reader announcement (politeness handling is host-side).
    fn announce(&self, message: &str);
    /// Trigger speech synthesis for `message`.
    fn speak(&self, message: &str);
    /// Monotonic clock in milliseconds; drives the accessible-timer hook.
    fn now_ms(&self) -> u64;
    fn storage_get(&self, key: &str) -> Option<String>;
    fn storage_set(&self, key: &str, value: &str);
}

// ─── Null implementation ──────────────────────────────────────────────────────

/// Platform that ignores every effect.  Used during compilation so
/// module-level code in a candidate cannot reach the host.
pub struct NullPlatform;

impl Platform for NullPlatform {
    fn announce(&self, _message: &str) {}
    fn speak(&self, _message: &str) {}
    fn now_ms(&self) -> u64 {
        0
    }
    fn storage_get(&self, _key: &str) -> Option<String> {
        None
    }
    fn storage_set(&self, _key: &str, _value: &str) {}
}

// ─── Recording implementation ─────────────────────────────────────────────────

/// In-memory platform double: records announcements and utterances, keeps
/// storage in a map, and exposes a manually advanced clock.
#[derive(Default)]
pub struct RecordingPlatform {
    announcements: RefCell<Vec<String>>,
    utterances: RefCell<Vec<String>>,
    clock_ms: Cell<u64>,
    store: RefCell<HashMap<String, String>>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fake clock by `ms`.
    pub fn advance(&self, ms: u64) {
        self.clock_ms.set(self.clock_ms.get() + ms);
    }

    pub fn announcements(&self) -> Vec<String> {
        self.announcements.borrow().clone()
    }

    pub fn utterances(&self) -> Vec<String> {
        self.utterances.borrow().clone()
    }
}

impl Platform for RecordingPlatform {
    fn announce(&self, message: &str) {
        self.announcements.borrow_mut().push(message.to_string());
    }

    fn speak(&self, message: &str) {
        self.utterances.borrow_mut().push(message.to_string());
    }

    fn now_ms(&self) -> u64 {
        self.clock_ms.get()
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.store.borrow().get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) {
        self.store.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_platform_captures_effects() {
        let p = RecordingPlatform::new();
        p.announce("timer started");
        p.speak("hello");
        p.storage_set("theme", "dark");
        p.advance(250);

        assert_eq!(p.announcements(), vec!["timer started".to_string()]);
        assert_eq!(p.utterances(), vec!["hello".to_string()]);
        assert_eq!(p.storage_get("theme").as_deref(), Some("dark"));
        assert_eq!(p.now_ms(), 250);
    }

    #[test]
    fn null_platform_is_inert() {
        let p = NullPlatform;
        p.announce("ignored");
        p.storage_set("k", "v");
        assert_eq!(p.storage_get("k"), None);
        assert_eq!(p.now_ms(), 0);
    }
}
