//! Changes to report back to the protocol layer
//!
//! Button-driven power and level changes happen behind the protocol stack's
//! back. Each applied change is queued here so the firmware can publish the
//! new attribute value to the network.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};

/// Capacity of the report queue
pub const REPORT_QUEUE_SIZE: usize = 8;

/// Attribute value changed locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightReport {
    Power(bool),
    Level(u8),
}

pub type ReportChannel = Channel<CriticalSectionRawMutex, LightReport, REPORT_QUEUE_SIZE>;

pub type ReportReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, LightReport, REPORT_QUEUE_SIZE>;
