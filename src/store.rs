//! Light state store
//!
//! Single owner of the logical light state and the strip driver. Requested
//! changes land in a critical-section cell right away, so they are never
//! lost. The strip and the state it shows live behind one async mutex that
//! is only ever taken with a bounded wait. Whoever holds that lock next folds
//! the latest requested state in before rendering. A caller that cannot get
//! the lock in time skips its render instead of stalling the protocol or
//! button path.

use core::cell::Cell;

use critical_section::Mutex as CsMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_time::{Duration, with_timeout};

use crate::OutputDriver;
use crate::color::{CctMapping, Rgb, hsv_to_rgb, xy_to_rgb};
use crate::config::LightConfig;
use crate::fade::{FadeController, FadeDirection, FadeSession};
use crate::renderer::FrameRenderer;
use crate::state::LightState;

struct Shared<D> {
    /// State the strip was last brought in line with
    shown: LightState,
    renderer: FrameRenderer<D>,
}

type SharedGuard<'a, D> = MutexGuard<'a, CriticalSectionRawMutex, Shared<D>>;

pub struct LightStateStore<D> {
    requested: CsMutex<Cell<LightState>>,
    shared: Mutex<CriticalSectionRawMutex, Shared<D>>,
    fade: FadeController,
    lock_timeout: Duration,
    led_count: usize,
    cct: CctMapping,
}

impl<D: OutputDriver> LightStateStore<D> {
    pub fn new(driver: D, config: &LightConfig) -> Self {
        Self::with_state(driver, config, LightState::new())
    }

    /// Create a store starting from `state`. Nothing is rendered yet.
    pub fn with_state(driver: D, config: &LightConfig, state: LightState) -> Self {
        Self {
            requested: CsMutex::new(Cell::new(state)),
            shared: Mutex::new(Shared {
                shown: state,
                renderer: FrameRenderer::new(driver, config.led_count),
            }),
            fade: FadeController::new(config.fade),
            lock_timeout: config.lock_timeout,
            led_count: config.led_count,
            cct: config.color_temperature,
        }
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    pub const fn fade(&self) -> &FadeController {
        &self.fade
    }

    /// Latest requested state, whether or not it reached the strip yet
    pub fn snapshot(&self) -> LightState {
        critical_section::with(|cs| self.requested.borrow(cs).get())
    }

    pub async fn set_power(&self, power: bool) -> LightState {
        log::debug!("set_power({})", power);
        self.update(|state| state.power = power).await
    }

    /// Flip the power state
    pub async fn toggle_power(&self) -> LightState {
        log::debug!("toggle_power()");
        self.update(|state| state.power = !state.power).await
    }

    pub async fn set_level(&self, level: u8) -> LightState {
        log::debug!("set_level({})", level);
        self.update(|state| state.level = level).await
    }

    pub async fn set_color_rgb(&self, color: Rgb) -> LightState {
        log::debug!("set_color_rgb({}, {}, {})", color.r, color.g, color.b);
        self.update(|state| state.color = color).await
    }

    /// Set the color from 16-bit CIE chromaticity coordinates
    pub async fn set_color_xy(&self, x: u16, y: u16) -> LightState {
        log::debug!("set_color_xy({}, {})", x, y);
        let color = xy_to_rgb(x, y);
        self.update(|state| state.color = color).await
    }

    pub async fn set_color_hue_sat(&self, hue: u8, sat: u8) -> LightState {
        log::debug!("set_color_hue_sat({}, {})", hue, sat);
        let color = hsv_to_rgb(hue, sat);
        self.update(|state| state.color = color).await
    }

    /// Set the color from a color temperature in mireds
    pub async fn set_color_temperature(&self, mireds: u16) -> LightState {
        log::debug!("set_color_temperature({})", mireds);
        let color = self.cct.mireds_to_channels(mireds);
        self.update(|state| state.color = color).await
    }

    /// Replace the whole state and render it once, without a fade
    pub async fn seed(&self, state: LightState) -> bool {
        critical_section::with(|cs| self.requested.borrow(cs).set(state));
        let Some(mut shared) = self.lock().await else {
            return false;
        };
        shared.shown = state;
        shared.renderer.present(state.frame(self.led_count))
    }

    /// Re-render the latest requested state
    ///
    /// Returns `true` if the frame reached the strip.
    pub async fn refresh(&self) -> bool {
        let Some(mut shared) = self.lock().await else {
            return false;
        };
        let state = self.fold(&mut shared);
        shared.renderer.present(state.frame(self.led_count))
    }

    /// Render one fade step in the latest requested color
    ///
    /// The shown state stays at the fade's end point, so a change arriving
    /// mid-fade is compared against where the animation is heading.
    pub(crate) async fn render_fade_frame(&self, session: &FadeSession, step: u16) -> bool {
        let Some(mut shared) = self.lock().await else {
            return false;
        };
        let color = self.snapshot().color;
        shared.renderer.present(session.frame(step, color))
    }

    /// Apply `change` and bring the strip in line with the new state
    ///
    /// The change itself always sticks. Crossing between "nothing lit" and
    /// "something lit" plays a fade, any other change renders directly. On
    /// lock timeout only the render is skipped.
    async fn update(&self, change: impl FnOnce(&mut LightState)) -> LightState {
        let requested = critical_section::with(|cs| {
            let cell = self.requested.borrow(cs);
            let mut state = cell.get();
            change(&mut state);
            cell.set(state);
            state
        });

        let Some(mut shared) = self.lock().await else {
            log::warn!("Render skipped, change kept for the next frame");
            return requested;
        };

        let before = shared.shown.lit_count(self.led_count);
        let state = self.fold(&mut shared);
        let after = state.lit_count(self.led_count);

        let direction = match (before, after) {
            (0, lit) if lit > 0 => Some((FadeDirection::In, lit)),
            (lit, 0) if lit > 0 => Some((FadeDirection::Out, lit)),
            _ => None,
        };

        match direction {
            Some((direction, lit)) => {
                drop(shared);
                let session = self.fade.session(direction, lit);
                self.fade.play(self, session).await;
            }
            None => {
                shared.renderer.present(state.frame(self.led_count));
            }
        }
        requested
    }

    /// Take over the latest requested state as the shown one
    fn fold(&self, shared: &mut Shared<D>) -> LightState {
        let state = self.snapshot();
        shared.shown = state;
        state
    }

    async fn lock(&self) -> Option<SharedGuard<'_, D>> {
        if let Ok(guard) = with_timeout(self.lock_timeout, self.shared.lock()).await {
            Some(guard)
        } else {
            log::warn!("Render lock not acquired within {} ms", self.lock_timeout.as_millis());
            None
        }
    }
}
