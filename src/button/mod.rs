//! Button input
//!
//! The interrupt side ([`EdgeDetector`]) debounces raw pin edges and queues
//! press/release events. A single consumer folds them into toggle and
//! continuous dimming with [`ButtonStateMachine`].

mod edge;
mod machine;

pub use edge::EdgeDetector;
pub use machine::{ButtonAction, ButtonActions, ButtonPhase, ButtonStateMachine, DimDirection, LightLevel};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

/// Capacity of the button event queue
pub const BUTTON_QUEUE_SIZE: usize = 8;

/// Debounced pin transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
    Release,
}

pub type ButtonChannel = Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_SIZE>;

pub type ButtonSender<'a> = Sender<'a, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_SIZE>;

pub type ButtonReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_SIZE>;
