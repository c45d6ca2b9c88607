//! gilrs-backed raw source
//!
//! gilrs already knows which physical control is which, so this source works
//! backwards: it takes a snapshot of one gamepad and lays it out in the raw
//! index space of a given [`Layout`], using the native driver conventions
//! (stick y negative up, hat y positive up, split triggers -1 at rest).
//!
//! gilrs needs `&mut Gilrs` to pump events, so the snapshot is not live. Call
//! [`GilrsSource::refresh`] once per frame after draining the event queue.

use gilrs::{Gamepad, GamepadId, Gilrs};
use tracing::{debug, info, warn};

use super::adapter::PadButtons;
use super::error::ControllerError;
use super::profile::{Axis, Button, DPad, Layout, PlatformProfile, TriggerAxes};
use super::source::RawInputSource;

const BUTTON_SLOTS: usize = 15;
const AXIS_SLOTS: usize = 6;

/// Initialises the gilrs context shared by every source
pub fn init_gilrs() -> Result<Gilrs, ControllerError> {
    match Gilrs::new() {
        Ok(gilrs) => {
            info!("Successfully initialized gilrs");
            Ok(gilrs)
        }
        Err(e) => Err(ControllerError::Backend(e.to_string())),
    }
}

/// Number of gamepads gilrs currently reports as connected
pub fn gamepad_count(gilrs: &Gilrs) -> usize {
    gilrs.gamepads().count()
}

/// One frame of gamepad input in gilrs conventions
///
/// Stick y is positive up, trigger pulls run from 0 (rest) to 1 (full).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Readings {
    pub left_stick: (f32, f32),
    pub right_stick: (f32, f32),
    pub left_pull: f32,
    pub right_pull: f32,
    pub dpad: PadButtons,
}

/// Raw-index view of one gamepad for a fixed layout
#[derive(Debug, Clone)]
pub(crate) struct LayoutSnapshot {
    index: usize,
    profile: PlatformProfile,
    buttons: [bool; BUTTON_SLOTS],
    axes: [f32; AXIS_SLOTS],
    hat: (i8, i8),
}

impl LayoutSnapshot {
    pub(crate) fn new(index: usize, layout: Layout) -> Self {
        Self {
            index,
            profile: layout.profile(),
            buttons: [false; BUTTON_SLOTS],
            axes: [0.0; AXIS_SLOTS],
            hat: (0, 0),
        }
    }

    pub(crate) fn layout(&self) -> Layout {
        self.profile.layout()
    }

    fn is_idle(&self) -> bool {
        !self.buttons.iter().any(|b| *b) && self.hat == (0, 0)
    }

    fn clear(&mut self) {
        self.buttons = [false; BUTTON_SLOTS];
        self.axes = [0.0; AXIS_SLOTS];
        self.hat = (0, 0);
    }

    /// Converts gilrs-convention readings into the layout's native raw values
    pub(crate) fn store(&mut self, readings: &Readings, pressed: impl Fn(Button) -> bool) {
        for button in Button::FACE_AND_SHOULDER {
            self.store_button(button, pressed(button));
        }
        if let DPad::Buttons { .. } = self.profile.dpad() {
            self.store_button(Button::DPadUp, readings.dpad.up);
            self.store_button(Button::DPadDown, readings.dpad.down);
            self.store_button(Button::DPadLeft, readings.dpad.left);
            self.store_button(Button::DPadRight, readings.dpad.right);
        }

        self.store_axis(Axis::LeftStickX, readings.left_stick.0);
        self.store_axis(Axis::LeftStickY, -readings.left_stick.1);
        self.store_axis(Axis::RightStickX, readings.right_stick.0);
        self.store_axis(Axis::RightStickY, -readings.right_stick.1);

        match self.profile.triggers() {
            TriggerAxes::Combined(_) => {
                self.store_axis(Axis::Triggers, readings.left_pull - readings.right_pull)
            }
            TriggerAxes::Split { .. } => {
                self.store_axis(Axis::LeftTrigger, readings.left_pull * 2.0 - 1.0);
                self.store_axis(Axis::RightTrigger, readings.right_pull * 2.0 - 1.0);
            }
        }

        let dpad = readings.dpad;
        self.hat = (
            i8::from(dpad.right) - i8::from(dpad.left),
            i8::from(dpad.up) - i8::from(dpad.down),
        );
    }

    fn store_button(&mut self, button: Button, pressed: bool) {
        if let Some(slot) = self
            .profile
            .button_index(button)
            .and_then(|index| self.buttons.get_mut(index))
        {
            *slot = pressed;
        }
    }

    fn store_axis(&mut self, axis: Axis, value: f32) {
        if let Some(slot) = self
            .profile
            .axis_index(axis)
            .and_then(|index| self.axes.get_mut(index))
        {
            *slot = value;
        }
    }
}

impl RawInputSource for LayoutSnapshot {
    fn id(&self) -> usize {
        self.index
    }

    fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    fn hat(&self, index: usize) -> (i8, i8) {
        match self.profile.dpad() {
            DPad::Hat(hat) if hat == index => self.hat,
            _ => {
                debug!("Hat {} queried on gamepad {} without such hat", index, self.index);
                (0, 0)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GilrsSource {
    gamepad: GamepadId,
    snapshot: LayoutSnapshot,
}

impl GilrsSource {
    /// Opens the `index`-th connected gamepad, counting from 0
    ///
    /// Build the adapter with [`GilrsSource::layout`] so both sides agree on
    /// the raw index space.
    ///
    /// # Errors
    ///
    /// [`ControllerError::InvalidDevice`] if fewer than `index + 1` gamepads
    /// are connected.
    pub fn open(gilrs: &Gilrs, index: usize, layout: Layout) -> Result<Self, ControllerError> {
        let (gamepad, name) = gilrs
            .gamepads()
            .nth(index)
            .map(|(id, gamepad)| (id, gamepad.name().to_string()))
            .ok_or(ControllerError::InvalidDevice { id: index })?;

        info!("Opened gamepad {}: {} ({}) as {:?}", index, name, gamepad, layout);

        let mut source = Self {
            gamepad,
            snapshot: LayoutSnapshot::new(index, layout),
        };
        source.refresh(gilrs);
        Ok(source)
    }

    pub fn gamepad_id(&self) -> GamepadId {
        self.gamepad
    }

    /// Layout whose raw index space this source fills
    pub fn layout(&self) -> Layout {
        self.snapshot.layout()
    }

    /// Copies the current gilrs state into the snapshot
    ///
    /// A gamepad that has gone away reads as fully released.
    pub fn refresh(&mut self, gilrs: &Gilrs) {
        let Some(gamepad) = gilrs.connected_gamepad(self.gamepad) else {
            if !self.snapshot.is_idle() {
                warn!(
                    "Gamepad {} disconnected, clearing its state",
                    self.snapshot.index
                );
            }
            self.snapshot.clear();
            return;
        };

        let readings = Readings {
            left_stick: (
                gamepad.value(gilrs::Axis::LeftStickX),
                gamepad.value(gilrs::Axis::LeftStickY),
            ),
            right_stick: (
                gamepad.value(gilrs::Axis::RightStickX),
                gamepad.value(gilrs::Axis::RightStickY),
            ),
            left_pull: trigger_pull(&gamepad, gilrs::Button::LeftTrigger2),
            right_pull: trigger_pull(&gamepad, gilrs::Button::RightTrigger2),
            dpad: PadButtons {
                up: gamepad.is_pressed(gilrs::Button::DPadUp),
                right: gamepad.is_pressed(gilrs::Button::DPadRight),
                down: gamepad.is_pressed(gilrs::Button::DPadDown),
                left: gamepad.is_pressed(gilrs::Button::DPadLeft),
            },
        };
        self.snapshot
            .store(&readings, |button| gamepad.is_pressed(gilrs_button(button)));
    }
}

impl RawInputSource for GilrsSource {
    fn id(&self) -> usize {
        self.snapshot.id()
    }

    fn button(&self, index: usize) -> bool {
        self.snapshot.button(index)
    }

    fn axis(&self, index: usize) -> f32 {
        self.snapshot.axis(index)
    }

    fn hat(&self, index: usize) -> (i8, i8) {
        self.snapshot.hat(index)
    }
}

// Analog trigger travel in [0, 1], falling back to the digital state
fn trigger_pull(gamepad: &Gamepad<'_>, button: gilrs::Button) -> f32 {
    match gamepad.button_data(button) {
        Some(data) => data.value(),
        None if gamepad.is_pressed(button) => 1.0,
        None => 0.0,
    }
}

fn gilrs_button(button: Button) -> gilrs::Button {
    match button {
        Button::A => gilrs::Button::South,
        Button::B => gilrs::Button::East,
        Button::X => gilrs::Button::West,
        Button::Y => gilrs::Button::North,
        Button::LeftBumper => gilrs::Button::LeftTrigger,
        Button::RightBumper => gilrs::Button::RightTrigger,
        Button::Back => gilrs::Button::Select,
        Button::Start => gilrs::Button::Start,
        Button::Guide => gilrs::Button::Mode,
        Button::LeftStickButton => gilrs::Button::LeftThumb,
        Button::RightStickButton => gilrs::Button::RightThumb,
        Button::DPadUp => gilrs::Button::DPadUp,
        Button::DPadDown => gilrs::Button::DPadDown,
        Button::DPadLeft => gilrs::Button::DPadLeft,
        Button::DPadRight => gilrs::Button::DPadRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::adapter::{ControllerAdapter, Pad, Stick};

    const LAYOUTS: [Layout; 3] = [Layout::Alpha, Layout::Beta, Layout::Gamma];
    const EPS: f32 = 1e-6;

    fn adapter_for(
        layout: Layout,
        readings: Readings,
        pressed: impl Fn(Button) -> bool,
    ) -> ControllerAdapter<LayoutSnapshot> {
        let mut snapshot = LayoutSnapshot::new(0, layout);
        snapshot.store(&readings, pressed);
        let layout = snapshot.layout();
        ControllerAdapter::with_layout(snapshot, layout, None).unwrap()
    }

    #[test]
    fn snapshot_reports_its_layout() {
        for layout in LAYOUTS {
            let snapshot = LayoutSnapshot::new(2, layout);
            assert_eq!(snapshot.layout(), layout);
            assert_eq!(snapshot.id(), 2);
        }
    }

    #[test]
    fn mismatched_layout_loses_the_dpad() {
        // Button-style D-pad stored, hat-style layout read back
        let readings = Readings {
            dpad: PadButtons {
                up: true,
                ..PadButtons::default()
            },
            ..Readings::default()
        };
        let mut snapshot = LayoutSnapshot::new(0, Layout::Gamma);
        snapshot.store(&readings, |_| false);
        let wrong = ControllerAdapter::with_layout(snapshot.clone(), Layout::Alpha, None).unwrap();
        assert_eq!(wrong.pad(), Pad::default());

        let layout = snapshot.layout();
        let right = ControllerAdapter::with_layout(snapshot, layout, None).unwrap();
        assert_eq!(right.pad(), Pad { x: 0, y: -1 });
    }

    #[test]
    fn stick_up_reads_negative_y() {
        for layout in LAYOUTS {
            let readings = Readings {
                left_stick: (0.0, 1.0),
                right_stick: (1.0, -1.0),
                ..Readings::default()
            };
            let adapter = adapter_for(layout, readings, |_| false);
            assert_eq!(adapter.left_stick(), Stick { x: 0.0, y: -1.0 }, "{layout:?}");
            assert_eq!(adapter.right_stick(), Stick { x: 1.0, y: 1.0 }, "{layout:?}");
        }
    }

    #[test]
    fn full_left_pull_reads_minus_one() {
        for layout in LAYOUTS {
            let readings = Readings {
                left_pull: 1.0,
                ..Readings::default()
            };
            let mut adapter = adapter_for(layout, readings, |_| false);
            assert!((adapter.trigger_axis() + 1.0).abs() < EPS, "{layout:?}");
        }
    }

    #[test]
    fn full_right_pull_reads_plus_one() {
        for layout in LAYOUTS {
            let readings = Readings {
                right_pull: 1.0,
                ..Readings::default()
            };
            let mut adapter = adapter_for(layout, readings, |_| false);
            assert!((adapter.trigger_axis() - 1.0).abs() < EPS, "{layout:?}");
        }
    }

    #[test]
    fn triggers_at_rest_read_center() {
        for layout in LAYOUTS {
            let mut adapter = adapter_for(layout, Readings::default(), |_| false);
            assert_eq!(adapter.trigger_axis(), 0.0, "{layout:?}");
        }
    }

    #[test]
    fn split_triggers_rest_at_minus_one() {
        let mut snapshot = LayoutSnapshot::new(0, Layout::Alpha);
        snapshot.store(&Readings::default(), |_| false);
        assert_eq!(snapshot.axis(2), -1.0);
        assert_eq!(snapshot.axis(5), -1.0);
    }

    #[test]
    fn dpad_up_reads_negative_y() {
        for layout in LAYOUTS {
            let readings = Readings {
                dpad: PadButtons {
                    up: true,
                    ..PadButtons::default()
                },
                ..Readings::default()
            };
            let adapter = adapter_for(layout, readings, |_| false);
            assert_eq!(adapter.pad(), Pad { x: 0, y: -1 }, "{layout:?}");
            assert!(adapter.pad_buttons().up, "{layout:?}");
        }
    }

    #[test]
    fn dpad_down_right_diagonal() {
        for layout in LAYOUTS {
            let readings = Readings {
                dpad: PadButtons {
                    down: true,
                    right: true,
                    ..PadButtons::default()
                },
                ..Readings::default()
            };
            let adapter = adapter_for(layout, readings, |_| false);
            assert_eq!(adapter.pad(), Pad { x: 1, y: 1 }, "{layout:?}");
        }
    }

    #[test]
    fn buttons_land_on_layout_indices() {
        for layout in LAYOUTS {
            let adapter = adapter_for(layout, Readings::default(), |b| {
                matches!(b, Button::A | Button::Start)
            });
            assert!(adapter.pressed(Button::A), "{layout:?}");
            assert!(adapter.pressed(Button::Start), "{layout:?}");
            assert!(!adapter.pressed(Button::Back), "{layout:?}");
            assert!(!adapter.pressed(Button::B), "{layout:?}");
        }
    }

    #[test]
    fn clear_releases_everything() {
        let mut snapshot = LayoutSnapshot::new(0, Layout::Gamma);
        let readings = Readings {
            left_stick: (0.5, 0.5),
            dpad: PadButtons {
                left: true,
                ..PadButtons::default()
            },
            ..Readings::default()
        };
        snapshot.store(&readings, |_| true);
        assert!(!snapshot.is_idle());

        snapshot.clear();
        assert!(snapshot.is_idle());
        assert_eq!(snapshot.axis(0), 0.0);
    }

    #[test]
    fn every_logical_button_has_a_gilrs_counterpart() {
        let mapped: Vec<_> = Button::FACE_AND_SHOULDER
            .iter()
            .map(|b| gilrs_button(*b))
            .collect();
        for (i, a) in mapped.iter().enumerate() {
            for b in &mapped[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn slots_cover_every_layout() {
        for layout in LAYOUTS {
            let profile = layout.profile();
            for button in Button::FACE_AND_SHOULDER {
                if let Some(index) = profile.button_index(button) {
                    assert!(index < BUTTON_SLOTS, "{layout:?} {button:?}");
                }
            }
            for axis in [
                Axis::LeftStickX,
                Axis::LeftStickY,
                Axis::RightStickX,
                Axis::RightStickY,
                Axis::Triggers,
                Axis::LeftTrigger,
                Axis::RightTrigger,
            ] {
                if let Some(index) = profile.axis_index(axis) {
                    assert!(index < AXIS_SLOTS, "{layout:?} {axis:?}");
                }
            }
        }
    }
}
