//! Debounced persistence of the light state
//!
//! Changes only mark the record dirty and wake the writer task. The writer
//! waits for a quiet period (restarted by every change) and then stores the
//! whole record with a single commit, so a burst of dimming steps costs one
//! flash write.

use core::cell::Cell;

use critical_section::Mutex as CsMutex;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;

use crate::color::MIREDS_DEFAULT;
use crate::config::PersistenceConfig;
use crate::error::StorageError;

pub const KEY_POWER: &str = "power";
pub const KEY_LEVEL: &str = "level";
pub const KEY_COLOR_TEMPERATURE: &str = "ct";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
}

/// Key-value store the record is persisted to
pub trait StorageSink {
    type Session<'a>: StorageSession
    where
        Self: 'a;

    /// Open `namespace`. The session is closed when dropped.
    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<Self::Session<'_>, StorageError>;
}

/// Open namespace of a [`StorageSink`]
///
/// Getters return `Ok(None)` for keys that were never written.
pub trait StorageSession {
    fn get_u8(&mut self, key: &'static str) -> Result<Option<u8>, StorageError>;
    fn get_u16(&mut self, key: &'static str) -> Result<Option<u16>, StorageError>;
    fn set_u8(&mut self, key: &'static str, value: u8) -> Result<(), StorageError>;
    fn set_u16(&mut self, key: &'static str, value: u16) -> Result<(), StorageError>;
    fn commit(&mut self) -> Result<(), StorageError>;
}

/// Fields that survive a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistRecord {
    pub power: bool,
    pub level: u8,
    /// Color temperature in mireds
    pub color_temperature: u16,
    pub dirty: bool,
}

impl PersistRecord {
    pub const fn new() -> Self {
        Self {
            power: false,
            level: 255,
            color_temperature: MIREDS_DEFAULT,
            dirty: false,
        }
    }

    fn same_values(&self, other: &Self) -> bool {
        self.power == other.power
            && self.level == other.level
            && self.color_temperature == other.color_temperature
    }
}

impl Default for PersistRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the persisted record and drives the debounced writer
pub struct PersistScheduler {
    config: PersistenceConfig,
    record: CsMutex<Cell<PersistRecord>>,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl PersistScheduler {
    pub const fn new(config: PersistenceConfig) -> Self {
        Self {
            config,
            record: CsMutex::new(Cell::new(PersistRecord::new())),
            changed: Signal::new(),
        }
    }

    /// Current record, readable from any context
    pub fn record(&self) -> PersistRecord {
        critical_section::with(|cs| self.record.borrow(cs).get())
    }

    pub fn set_power(&self, power: bool) {
        self.schedule(|record| record.power = power);
    }

    pub fn set_level(&self, level: u8) {
        self.schedule(|record| record.level = level);
    }

    pub fn set_color_temperature(&self, mireds: u16) {
        self.schedule(|record| record.color_temperature = mireds);
    }

    /// Update the record, mark it dirty and restart the quiet period
    pub fn schedule(&self, update: impl FnOnce(&mut PersistRecord)) {
        critical_section::with(|cs| {
            let cell = self.record.borrow(cs);
            let mut record = cell.get();
            update(&mut record);
            record.dirty = true;
            cell.set(record);
        });
        self.changed.signal(());
    }

    /// Read the stored record, falling back to defaults for missing keys
    ///
    /// The loaded record becomes the current one, clean.
    pub fn load<S: StorageSink>(&self, sink: &mut S) -> Result<PersistRecord, StorageError> {
        let mut record = PersistRecord::new();
        {
            let mut session = sink.open(self.config.namespace, OpenMode::ReadOnly)?;
            if let Some(power) = session.get_u8(KEY_POWER)? {
                record.power = power != 0;
            }
            if let Some(level) = session.get_u8(KEY_LEVEL)? {
                record.level = level;
            }
            if let Some(ct) = session.get_u16(KEY_COLOR_TEMPERATURE)? {
                record.color_temperature = ct;
            }
        }
        critical_section::with(|cs| self.record.borrow(cs).set(record));
        log::info!(
            "Restored light: power={} level={} ct={}",
            record.power,
            record.level,
            record.color_temperature
        );
        Ok(record)
    }

    /// Write the record now if it is dirty
    ///
    /// Returns `true` if a commit happened.
    pub fn flush_now<S: StorageSink>(&self, sink: &mut S) -> Result<bool, StorageError> {
        let record = self.record();
        if !record.dirty {
            return Ok(false);
        }

        {
            let mut session = sink.open(self.config.namespace, OpenMode::ReadWrite)?;
            session.set_u8(KEY_POWER, u8::from(record.power))?;
            session.set_u8(KEY_LEVEL, record.level)?;
            session.set_u16(KEY_COLOR_TEMPERATURE, record.color_temperature)?;
            session.commit()?;
        }

        // Changes made while writing stay dirty for the next round.
        critical_section::with(|cs| {
            let cell = self.record.borrow(cs);
            let mut current = cell.get();
            if current.same_values(&record) {
                current.dirty = false;
                cell.set(current);
            }
        });
        log::info!(
            "Persisted light: power={} level={} ct={}",
            record.power,
            record.level,
            record.color_temperature
        );
        Ok(true)
    }

    /// Writer task loop
    pub async fn run<S: StorageSink>(&self, sink: &mut S) -> ! {
        let mut pending = false;
        loop {
            if pending {
                match select(self.changed.wait(), Timer::after(self.config.delay)).await {
                    Either::First(()) => {}
                    Either::Second(()) => {
                        pending = false;
                        if let Err(e) = self.flush_now(sink) {
                            log::warn!("Persisting light state failed: {}", e);
                        }
                    }
                }
            } else {
                self.changed.wait().await;
                pending = true;
            }
        }
    }
}
