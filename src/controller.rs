//! Light controller
//!
//! Aggregate the firmware talks to. Protocol handlers call the async
//! mutators, the firmware spawns the `run_*` loops as executor tasks.

use embassy_futures::select::{Either, select};
use embassy_time::{Instant, Ticker, Timer};

use crate::OutputDriver;
use crate::button::{ButtonAction, ButtonReceiver, ButtonStateMachine, LightLevel};
use crate::color::Rgb;
use crate::config::{ButtonConfig, LightConfig, PersistenceConfig};
use crate::persistence::{PersistRecord, PersistScheduler, StorageSink};
use crate::power;
use crate::refresh::PeriodicRefresher;
use crate::report::{LightReport, ReportChannel, ReportReceiver};
use crate::state::LightState;
use crate::store::LightStateStore;

pub struct LightController<D> {
    config: LightConfig,
    store: LightStateStore<D>,
    refresher: PeriodicRefresher,
    persistence: PersistScheduler,
    reports: ReportChannel,
}

impl<D: OutputDriver> LightController<D> {
    pub fn new(driver: D, config: LightConfig, persistence: PersistenceConfig) -> Self {
        Self {
            store: LightStateStore::new(driver, &config),
            refresher: PeriodicRefresher::new(config.refresh_period),
            persistence: PersistScheduler::new(persistence),
            reports: ReportChannel::new(),
            config,
        }
    }

    pub const fn config(&self) -> &LightConfig {
        &self.config
    }

    pub const fn store(&self) -> &LightStateStore<D> {
        &self.store
    }

    pub const fn persistence(&self) -> &PersistScheduler {
        &self.persistence
    }

    /// Power and level changes made by the button, to publish upstream
    pub fn reports(&self) -> ReportReceiver<'_> {
        self.reports.receiver()
    }

    /// Seed the light from storage and show it
    ///
    /// Missing keys (or an unreadable store) keep the defaults. Exactly one
    /// frame is rendered, without a fade.
    pub async fn restore<S: StorageSink>(&self, sink: &mut S) -> PersistRecord {
        let record = match self.persistence.load(sink) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Loading light state failed, using defaults: {}", e);
                self.persistence.record()
            }
        };
        let state = LightState {
            power: record.power,
            level: record.level,
            color: self
                .config
                .color_temperature
                .mireds_to_channels(record.color_temperature),
        };
        if !self.store.seed(state).await {
            log::warn!("Initial frame not rendered");
        }
        record
    }

    /// Latest requested state
    pub fn snapshot(&self) -> LightState {
        self.store.snapshot()
    }

    pub async fn set_power(&self, power: bool) -> LightState {
        let state = self.store.set_power(power).await;
        self.persistence.set_power(state.power);
        state
    }

    pub async fn toggle_power(&self) -> LightState {
        let state = self.store.toggle_power().await;
        self.persistence.set_power(state.power);
        state
    }

    pub async fn set_level(&self, level: u8) -> LightState {
        let state = self.store.set_level(level).await;
        self.persistence.set_level(state.level);
        state
    }

    pub async fn set_color_rgb(&self, color: Rgb) -> LightState {
        self.store.set_color_rgb(color).await
    }

    pub async fn set_color_xy(&self, x: u16, y: u16) -> LightState {
        self.store.set_color_xy(x, y).await
    }

    pub async fn set_color_hue_sat(&self, hue: u8, sat: u8) -> LightState {
        self.store.set_color_hue_sat(hue, sat).await
    }

    /// Set the color temperature in mireds
    pub async fn set_color_temperature(&self, mireds: u16) -> LightState {
        let state = self.store.set_color_temperature(mireds).await;
        self.persistence.set_color_temperature(mireds);
        state
    }

    /// Power and level as last requested, readable without the render lock
    pub fn light_level(&self) -> LightLevel {
        let state = self.store.snapshot();
        LightLevel {
            power: state.power,
            level: state.level,
        }
    }

    pub async fn run_refresher(&self) -> ! {
        self.refresher.run(&self.store).await
    }

    pub async fn run_persistence<S: StorageSink>(&self, sink: &mut S) -> ! {
        self.persistence.run(sink).await
    }

    /// Button consumer task loop
    pub async fn run_button(&self, receiver: ButtonReceiver<'_>, config: ButtonConfig) -> ! {
        let mut machine = ButtonStateMachine::new(config);
        loop {
            let actions = match machine.next_deadline() {
                Some(deadline) => match select(receiver.receive(), Timer::at(deadline)).await {
                    Either::First(event) => machine.handle(event, Instant::now(), self.light_level()),
                    Either::Second(()) => machine.poll(Instant::now(), self.light_level()),
                },
                None => {
                    let event = receiver.receive().await;
                    machine.handle(event, Instant::now(), self.light_level())
                }
            };
            for action in actions {
                self.apply(action).await;
            }
        }
    }

    /// Log the estimated strip current periodically
    pub async fn run_power_monitor(&self) -> ! {
        let mut ticker = Ticker::every(self.config.power_report_period);
        loop {
            ticker.next().await;
            power::report(&self.store.snapshot(), self.config.led_count);
        }
    }

    async fn apply(&self, action: ButtonAction) {
        let report = match action {
            ButtonAction::TogglePower => LightReport::Power(self.toggle_power().await.power),
            ButtonAction::SetPower(power) => LightReport::Power(self.set_power(power).await.power),
            ButtonAction::SetLevel(level) => LightReport::Level(self.set_level(level).await.level),
        };
        if self.reports.try_send(report).is_err() {
            log::warn!("Report queue full, {:?} dropped", report);
        }
    }
}
