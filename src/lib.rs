#![no_std]

pub mod bounds;
pub mod button;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod fade;
pub mod persistence;
pub mod power;
pub mod refresh;
pub mod renderer;
pub mod report;
pub mod scheduler;
pub mod state;
pub mod store;

pub use bounds::PixelRange;
pub use button::{
    ButtonAction, ButtonChannel, ButtonEvent, ButtonReceiver, ButtonSender, ButtonStateMachine,
    EdgeDetector, LightLevel,
};
pub use color::{CctMapping, Rgb, WarmColdAmber};
pub use config::{ButtonConfig, FadeTimings, LightConfig, Level, PersistenceConfig, Pull};
pub use controller::LightController;
pub use error::{RenderError, StorageError};
pub use fade::{FadeController, FadeDirection, FadeSession};
pub use persistence::{OpenMode, PersistRecord, PersistScheduler, StorageSession, StorageSink};
pub use refresh::PeriodicRefresher;
pub use renderer::FrameRenderer;
pub use report::{LightReport, ReportChannel, ReportReceiver};
pub use scheduler::SoftTimer;
pub use state::{Frame, LightState};
pub use store::LightStateStore;

pub use embassy_time::{Duration, Instant};

/// Addressable LED strip transport
///
/// Implement this trait to support different hardware platforms.
/// Pixels are staged with [`set_pixel`](OutputDriver::set_pixel) and become
/// visible on [`flush`](OutputDriver::flush).
pub trait OutputDriver {
    type Error: core::fmt::Debug;

    /// Stage a color for a single pixel
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Push the staged frame to the strip
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Install the `esp-println` logger as the `log` backend.
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
