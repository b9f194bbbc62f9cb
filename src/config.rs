//! Light configuration
//!
//! Plain structs handed over at construction time. `Default` yields the
//! values the firmware ships with.

use embassy_time::Duration;

use crate::color::CctMapping;

/// Timings of the center fade animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTimings {
    /// Total duration of one fade
    pub duration: Duration,
    /// Number of frames after the initial one
    pub frames: u16,
}

impl FadeTimings {
    /// Delay between two consecutive frames (never below 1 ms)
    pub fn frame_delay(&self) -> Duration {
        let frames = u64::from(self.frames.max(1));
        let delay = self.duration.as_millis() / frames;
        Duration::from_millis(delay.max(1))
    }
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            frames: 20,
        }
    }
}

/// Configuration of the light core
#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    /// Number of pixels on the strip
    pub led_count: usize,
    pub fade: FadeTimings,
    /// Period of the glitch-masking re-render
    pub refresh_period: Duration,
    /// Bounded wait for the render lock
    pub lock_timeout: Duration,
    /// Lamp topology used for color temperature
    pub color_temperature: CctMapping,
    /// Period of the estimated current log line
    pub power_report_period: Duration,
}

impl LightConfig {
    pub fn new(led_count: usize) -> Self {
        Self {
            led_count,
            ..Self::default()
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            led_count: 60,
            fade: FadeTimings::default(),
            refresh_period: Duration::from_secs(3),
            lock_timeout: Duration::from_millis(50),
            color_temperature: CctMapping::default(),
            power_report_period: Duration::from_secs(5),
        }
    }
}

/// Electrical level of a digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Pull resistor of a digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
}

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    /// Pin level while the button is held
    pub active_level: Level,
    /// Edges closer than this to the last accepted one are dropped
    pub debounce: Duration,
    /// Hold time before dimming starts
    pub long_press: Duration,
    /// Period of level steps while dimming
    pub dim_interval: Duration,
    /// Level change per dim step
    pub dim_step: u8,
}

impl ButtonConfig {
    /// Pull resistor that keeps the pin inactive while released.
    pub const fn pull(&self) -> Pull {
        match self.active_level {
            Level::Low => Pull::Up,
            Level::High => Pull::Down,
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_level: Level::Low,
            debounce: Duration::from_millis(50),
            long_press: Duration::from_millis(400),
            dim_interval: Duration::from_millis(150),
            dim_step: 15,
        }
    }
}

/// Debounced persistence configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Storage namespace holding the light keys
    pub namespace: &'static str,
    /// Quiet period before a dirty record is written
    pub delay: Duration,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            namespace: "light",
            delay: Duration::from_secs(10),
        }
    }
}
