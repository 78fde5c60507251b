//! Single-slot notification center
//!
//! At most one notification is visible. Showing a new one replaces the
//! current one; it dismisses itself after `lifetime`, spending the last
//! `FADE_DURATION` of its life in a fading phase. Time is passed in by the
//! caller so the whole lifecycle can be driven from tests.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::NotifyLevel;

pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);
pub const FADE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<Notification>,
    lifetime: Duration,
    shown_count: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            lifetime,
            shown_count: 0,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, level: NotifyLevel, now: Instant) {
        let message = message.into();
        debug!(level = level.as_str(), %message, "notification");
        self.current = Some(Notification {
            message,
            level,
            shown_at: now,
        });
        self.shown_count += 1;
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Total notifications shown over the session
    pub fn shown_count(&self) -> u64 {
        self.shown_count
    }

    pub fn phase(&self, now: Instant) -> Option<Phase> {
        let current = self.current.as_ref()?;
        let age = now.saturating_duration_since(current.shown_at);
        if age >= self.lifetime {
            Some(Phase::Fading)
        } else {
            Some(Phase::Visible)
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let age = now.saturating_duration_since(current.shown_at);
        if age >= self.lifetime + FADE_DURATION {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_replaces_current() {
        let now = Instant::now();
        let mut center = NotificationCenter::default();
        center.show("primero", NotifyLevel::Info, now);
        center.show("segundo", NotifyLevel::Warning, now);
        let current = center.current().unwrap();
        assert_eq!(current.message, "segundo");
        assert_eq!(current.level, NotifyLevel::Warning);
        assert_eq!(center.shown_count(), 2);
    }

    #[test]
    fn test_auto_dismiss_after_fade() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        center.show("hola", NotifyLevel::Success, start);

        center.on_tick(start + Duration::from_secs(4));
        assert_eq!(center.phase(start + Duration::from_secs(4)), Some(Phase::Visible));

        let fading = start + Duration::from_millis(5_200);
        center.on_tick(fading);
        assert_eq!(center.phase(fading), Some(Phase::Fading));

        center.on_tick(start + Duration::from_millis(5_500));
        assert!(center.current().is_none());
    }

    #[test]
    fn test_replacement_restarts_lifetime() {
        let start = Instant::now();
        let mut center = NotificationCenter::default();
        center.show("a", NotifyLevel::Info, start);
        let later = start + Duration::from_secs(4);
        center.show("b", NotifyLevel::Info, later);
        center.on_tick(start + Duration::from_secs(6));
        assert_eq!(center.current().map(|n| n.message.as_str()), Some("b"));
    }

    #[test]
    fn test_manual_close() {
        let mut center = NotificationCenter::default();
        center.show("x", NotifyLevel::Info, Instant::now());
        center.close();
        assert!(center.current().is_none());
        assert_eq!(center.phase(Instant::now()), None);
    }
}
