use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_time::{Duration, Instant};

use super::{ButtonEvent, ButtonSender};
use crate::config::Level;

/// Interrupt-side edge debouncer
///
/// Safe to call from an interrupt handler: it only touches atomics and
/// enqueues without blocking. Timestamps are kept as wrapping `u32`
/// milliseconds.
pub struct EdgeDetector {
    debounce_ms: u32,
    active_level: Level,
    last_edge_ms: AtomicU32,
    seen_edge: AtomicBool,
}

impl EdgeDetector {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(debounce: Duration, active_level: Level) -> Self {
        Self {
            debounce_ms: debounce.as_millis() as u32,
            active_level,
            last_edge_ms: AtomicU32::new(0),
            seen_edge: AtomicBool::new(false),
        }
    }

    /// Debounce an edge seen at `now` with the pin reading `level`
    ///
    /// Returns the classified event, or `None` if the edge came within the
    /// debounce window of the last accepted one.
    #[allow(clippy::cast_possible_truncation)]
    pub fn accept(&self, now: Instant, level: Level) -> Option<ButtonEvent> {
        let now_ms = now.as_millis() as u32;
        if self.seen_edge.load(Ordering::Acquire) {
            let last_ms = self.last_edge_ms.load(Ordering::Acquire);
            if now_ms.wrapping_sub(last_ms) < self.debounce_ms {
                return None;
            }
        }
        self.last_edge_ms.store(now_ms, Ordering::Release);
        self.seen_edge.store(true, Ordering::Release);

        if level == self.active_level {
            Some(ButtonEvent::Press)
        } else {
            Some(ButtonEvent::Release)
        }
    }

    /// Debounce an edge and queue the resulting event
    ///
    /// A full queue drops the event. Returns `true` if an event was queued.
    pub fn on_edge(&self, now: Instant, level: Level, sender: &ButtonSender<'_>) -> bool {
        match self.accept(now, level) {
            Some(event) => sender.try_send(event).is_ok(),
            None => false,
        }
    }
}
