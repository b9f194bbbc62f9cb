use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};

use crate::OutputDriver;
use crate::store::LightStateStore;

/// Periodically re-flushes the current frame
///
/// Masks strip glitches such as a dropped write. Stands by while a fade
/// owns the strip and restarts its period once the fade is over.
pub struct PeriodicRefresher {
    period: Duration,
}

impl PeriodicRefresher {
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Run one refresh unless a fade is active
    ///
    /// Returns `true` if a frame was rendered.
    pub async fn tick<D: OutputDriver>(&self, store: &LightStateStore<D>) -> bool {
        if store.fade().is_active() {
            return false;
        }
        store.refresh().await
    }

    /// Refresher task loop
    pub async fn run<D: OutputDriver>(&self, store: &LightStateStore<D>) -> ! {
        loop {
            match select(Timer::after(self.period), store.fade().wait_finished()).await {
                Either::First(()) => {
                    self.tick(store).await;
                }
                Either::Second(()) => {
                    log::debug!("Refresher resumed after fade");
                }
            }
        }
    }
}
