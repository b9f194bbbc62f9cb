#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use myrtio_strip_light::persistence::{OpenMode, StorageSession, StorageSink};
use myrtio_strip_light::{OutputDriver, Rgb, StorageError};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripFault;

#[derive(Default)]
pub struct StripLog {
    staged: Vec<Rgb>,
    pub frames: Vec<Vec<Rgb>>,
    pub fail_pixel: Option<usize>,
    pub fail_flush: bool,
    /// Blocking delay applied to the next `slow_flushes` flushes
    pub flush_delay: StdDuration,
    pub slow_flushes: usize,
}

/// Strip driver recording every flushed frame
#[derive(Clone, Default)]
pub struct MockStrip {
    pub log: Arc<Mutex<StripLog>>,
}

impl MockStrip {
    /// Make the next `count` flushes block the calling thread for `delay`
    pub fn slow_down(&self, delay: StdDuration, count: usize) {
        let mut log = self.log.lock().unwrap();
        log.flush_delay = delay;
        log.slow_flushes = count;
    }

    pub fn frames(&self) -> Vec<Vec<Rgb>> {
        self.log.lock().unwrap().frames.clone()
    }

    pub fn frame_count(&self) -> usize {
        self.log.lock().unwrap().frames.len()
    }

    pub fn last_frame(&self) -> Option<Vec<Rgb>> {
        self.log.lock().unwrap().frames.last().cloned()
    }
}

impl OutputDriver for MockStrip {
    type Error = StripFault;

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        let mut log = self.log.lock().unwrap();
        if log.fail_pixel == Some(index) {
            return Err(StripFault);
        }
        if log.staged.len() <= index {
            log.staged.resize(index + 1, BLACK);
        }
        log.staged[index] = color;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let delay = {
            let mut log = self.log.lock().unwrap();
            if log.slow_flushes > 0 {
                log.slow_flushes -= 1;
                Some(log.flush_delay)
            } else {
                None
            }
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let mut log = self.log.lock().unwrap();
        if log.fail_flush {
            return Err(StripFault);
        }
        let frame = log.staged.clone();
        log.frames.push(frame);
        Ok(())
    }
}

/// Number of non-black pixels in a frame
pub fn lit(frame: &[Rgb]) -> usize {
    frame.iter().filter(|c| **c != BLACK).count()
}

#[derive(Default)]
pub struct StorageLog {
    pub values: HashMap<String, u16>,
    pub pending: HashMap<String, u16>,
    pub commits: usize,
    pub fail_open: bool,
    pub fail_commit: bool,
}

/// In-memory key-value store counting commits
#[derive(Clone, Default)]
pub struct MockStorage {
    pub log: Arc<Mutex<StorageLog>>,
}

impl MockStorage {
    pub fn with_values(values: &[(&str, u16)]) -> Self {
        let storage = Self::default();
        {
            let mut log = storage.log.lock().unwrap();
            for (key, value) in values {
                log.values.insert((*key).to_string(), *value);
            }
        }
        storage
    }

    pub fn commits(&self) -> usize {
        self.log.lock().unwrap().commits
    }

    pub fn value(&self, key: &str) -> Option<u16> {
        self.log.lock().unwrap().values.get(key).copied()
    }
}

pub struct MockSession<'a> {
    storage: &'a MockStorage,
}

impl StorageSink for MockStorage {
    type Session<'a> = MockSession<'a>;

    fn open(&mut self, _namespace: &str, _mode: OpenMode) -> Result<Self::Session<'_>, StorageError> {
        if self.log.lock().unwrap().fail_open {
            return Err(StorageError::Open);
        }
        Ok(MockSession { storage: self })
    }
}

impl StorageSession for MockSession<'_> {
    fn get_u8(&mut self, key: &'static str) -> Result<Option<u8>, StorageError> {
        let value = self.storage.log.lock().unwrap().values.get(key).copied();
        value.map(|v| u8::try_from(v).map_err(|_| StorageError::Read(key))).transpose()
    }

    fn get_u16(&mut self, key: &'static str) -> Result<Option<u16>, StorageError> {
        Ok(self.storage.log.lock().unwrap().values.get(key).copied())
    }

    fn set_u8(&mut self, key: &'static str, value: u8) -> Result<(), StorageError> {
        self.set_u16(key, u16::from(value))
    }

    fn set_u16(&mut self, key: &'static str, value: u16) -> Result<(), StorageError> {
        let mut log = self.storage.log.lock().unwrap();
        log.pending.insert(key.to_string(), value);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        let mut log = self.storage.log.lock().unwrap();
        if log.fail_commit {
            log.pending.clear();
            return Err(StorageError::Commit);
        }
        let pending: Vec<_> = log.pending.drain().collect();
        log.values.extend(pending);
        log.commits += 1;
        Ok(())
    }
}
