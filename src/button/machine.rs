use embassy_time::Instant;
use heapless::Vec;

use super::ButtonEvent;
use crate::config::ButtonConfig;
use crate::scheduler::{SoftTimer, earliest};

/// Power and level the machine bases its decisions on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightLevel {
    pub power: bool,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Idle,
    PressedPendingLong,
    LongPressDimming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimDirection {
    Up,
    Down,
}

impl DimDirection {
    const fn sign(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Light change requested by the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    TogglePower,
    SetPower(bool),
    SetLevel(u8),
}

pub type ButtonActions = Vec<ButtonAction, 4>;

/// Press, long-press and dimming logic
///
/// Pure: it never touches the light, it returns the actions to apply.
/// Time comes in explicitly so the machine runs the same under test.
pub struct ButtonStateMachine {
    config: ButtonConfig,
    phase: ButtonPhase,
    direction: DimDirection,
    long_press: SoftTimer,
    dim_step: SoftTimer,
}

impl ButtonStateMachine {
    pub const fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            phase: ButtonPhase::Idle,
            direction: DimDirection::Up,
            long_press: SoftTimer::new(),
            dim_step: SoftTimer::new(),
        }
    }

    pub const fn phase(&self) -> ButtonPhase {
        self.phase
    }

    pub const fn direction(&self) -> DimDirection {
        self.direction
    }

    /// When [`poll`](Self::poll) next has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.long_press.deadline(), self.dim_step.deadline())
    }

    /// Fold a debounced event into the machine
    pub fn handle(&mut self, event: ButtonEvent, now: Instant, light: LightLevel) -> ButtonActions {
        let mut actions = ButtonActions::new();
        match (event, self.phase) {
            (ButtonEvent::Press, _) => {
                self.dim_step.cancel();
                self.long_press.schedule_once(now, self.config.long_press);
                self.transition(ButtonPhase::PressedPendingLong);
            }
            (ButtonEvent::Release, ButtonPhase::Idle) => {
                log::debug!("Button release without press ignored");
            }
            (ButtonEvent::Release, ButtonPhase::PressedPendingLong) => {
                self.long_press.cancel();
                push(&mut actions, ButtonAction::TogglePower);
                log::debug!("Button short press, power was {}", light.power);
                self.transition(ButtonPhase::Idle);
            }
            (ButtonEvent::Release, ButtonPhase::LongPressDimming) => {
                self.long_press.cancel();
                self.dim_step.cancel();
                self.transition(ButtonPhase::Idle);
            }
        }
        actions
    }

    /// Fire the timers that are due at `now`
    pub fn poll(&mut self, now: Instant, light: LightLevel) -> ButtonActions {
        let mut actions = ButtonActions::new();

        if self.long_press.poll(now) && self.phase == ButtonPhase::PressedPendingLong {
            self.transition(ButtonPhase::LongPressDimming);
            if !light.power {
                push(&mut actions, ButtonAction::SetPower(true));
            }
            self.dim_step.schedule_periodic(now, self.config.dim_interval);
            return actions;
        }

        if self.dim_step.poll(now) && self.phase == ButtonPhase::LongPressDimming {
            self.step(light, &mut actions);
        }
        actions
    }

    /// Move the level one step, bouncing off both ends
    fn step(&mut self, light: LightLevel, actions: &mut ButtonActions) {
        let mut level = i16::from(light.level) + i16::from(self.config.dim_step) * self.direction.sign();
        if level <= 0 {
            level = 0;
            self.direction = DimDirection::Up;
        } else if level >= 255 {
            level = 255;
            self.direction = DimDirection::Down;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = level as u8;

        push(actions, ButtonAction::SetLevel(level));
        if level == 0 && light.power {
            push(actions, ButtonAction::SetPower(false));
        } else if level > 0 && !light.power {
            push(actions, ButtonAction::SetPower(true));
        }
        log::debug!("Dim step to {} ({:?})", level, self.direction);
    }

    fn transition(&mut self, phase: ButtonPhase) {
        if self.phase != phase {
            log::debug!("Button {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

fn push(actions: &mut ButtonActions, action: ButtonAction) {
    if actions.push(action).is_err() {
        log::warn!("Button action {:?} dropped", action);
    }
}
