//! Center fade animation
//!
//! A fade grows the lit range out of the middle of the strip (or shrinks it
//! back) while ramping the color from black in lockstep. Frames are spread
//! evenly over the configured duration and each one takes the render lock
//! on its own, so other callers can interleave between frames.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};

use crate::OutputDriver;
use crate::color::{Rgb, scale_color};
use crate::config::FadeTimings;
use crate::state::Frame;
use crate::store::LightStateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Grow from nothing to the target lit count
    In,
    /// Shrink from the starting lit count to nothing
    Out,
}

/// One fade animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSession {
    pub direction: FadeDirection,
    /// Frames after the initial one
    pub total_frames: u16,
    /// Fully lit end of the animation: the target for a fade in, the
    /// starting point for a fade out.
    pub target_lit: usize,
}

impl FadeSession {
    pub const fn fade_in(target_lit: usize, total_frames: u16) -> Self {
        Self {
            direction: FadeDirection::In,
            total_frames,
            target_lit,
        }
    }

    pub const fn fade_out(start_lit: usize, total_frames: u16) -> Self {
        Self {
            direction: FadeDirection::Out,
            total_frames,
            target_lit: start_lit,
        }
    }

    /// Frame shown at `step` (`0..=total_frames`) with full color `color`
    pub fn frame(&self, step: u16, color: Rgb) -> Frame {
        let (progress, total) = self.progress(step);
        let lit_count = self.target_lit * progress as usize / total as usize;
        Frame {
            lit_count,
            color: scale_color(color, progress, total),
        }
    }

    /// Frame the animation ends on
    pub fn last_frame(&self, color: Rgb) -> Frame {
        self.frame(self.total_frames, color)
    }

    /// Fraction of the fully lit frame reached at `step`
    fn progress(&self, step: u16) -> (u32, u32) {
        if self.total_frames == 0 {
            return match self.direction {
                FadeDirection::In => (1, 1),
                FadeDirection::Out => (0, 1),
            };
        }
        let total = u32::from(self.total_frames);
        let step = u32::from(step).min(total);
        match self.direction {
            FadeDirection::In => (step, total),
            FadeDirection::Out => (total - step, total),
        }
    }
}

/// Runs fade sessions one at a time and tells the refresher to stand by
pub struct FadeController {
    timings: FadeTimings,
    active: AtomicBool,
    resumed: Signal<CriticalSectionRawMutex, ()>,
    gate: Mutex<CriticalSectionRawMutex, ()>,
}

impl FadeController {
    pub const fn new(timings: FadeTimings) -> Self {
        Self {
            timings,
            active: AtomicBool::new(false),
            resumed: Signal::new(),
            gate: Mutex::new(()),
        }
    }

    /// Whether a fade currently owns the strip
    ///
    /// Read without any lock. A stale value costs at most one refresh.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub const fn timings(&self) -> FadeTimings {
        self.timings
    }

    pub const fn session(&self, direction: FadeDirection, lit: usize) -> FadeSession {
        match direction {
            FadeDirection::In => FadeSession::fade_in(lit, self.timings.frames),
            FadeDirection::Out => FadeSession::fade_out(lit, self.timings.frames),
        }
    }

    /// Wait until a fade finishes
    ///
    /// Single waiter only: the refresher parks here.
    pub(crate) async fn wait_finished(&self) {
        self.resumed.wait().await;
    }

    /// Play `session` on the store's strip
    ///
    /// Waits for a running session to finish first. A frame whose lock
    /// times out is skipped, the animation carries on.
    pub(crate) async fn play<D: OutputDriver>(
        &self,
        store: &LightStateStore<D>,
        session: FadeSession,
    ) {
        let _gate = self.gate.lock().await;

        self.active.store(true, Ordering::Release);
        log::info!(
            "Fade {:?} started: {} px over {} frames",
            session.direction,
            session.target_lit,
            session.total_frames
        );

        let delay = self.timings.frame_delay();
        let start = Instant::now();
        let mut skipped = 0u16;
        for step in 0..=session.total_frames {
            if !store.render_fade_frame(&session, step).await {
                skipped += 1;
            }
            if step < session.total_frames {
                Timer::at(start + delay * u32::from(step + 1)).await;
            }
        }

        self.active.store(false, Ordering::Release);
        self.resumed.signal(());

        if skipped > 0 {
            log::warn!("Fade {:?} finished, {} frames skipped", session.direction, skipped);
        } else {
            log::info!("Fade {:?} finished", session.direction);
        }
    }
}
