//! Controller Adapter - normalized view over one raw gamepad
//!
//! Wraps a [`RawInputSource`] and a resolved [`PlatformProfile`] and answers
//! every query in the same platform-independent convention:
//!
//! - Stick and pad axes: negative is left/up, positive is right/down
//! - Trigger axis: -1 is left fully pulled, +1 is right fully pulled, both
//!   triggers pulled together cancel out
//! - Buttons: plain pressed/released, no transform
//!
//! # Architecture
//!
//! ```text
//! RawInputSource ──► profile lookup ──► raw value ──► transform ──► caller
//!                    (PlatformProfile)                (dead zone / trigger latch / hat sign)
//! ```
//!
//! Nothing is buffered. Each call reads the source as it is right now, so the
//! caller refreshes the source once per frame before querying.

use tracing::{debug, info};

use super::deadzone::{adjust, DEFAULT_DEAD_ZONE};
use super::error::ControllerError;
use super::profile::{Axis, Button, DPad, Layout, PlatformProfile, TriggerAxes};
use super::source::RawInputSource;

/// Normalized analog stick position, dead zone already applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

/// D-pad as a signed pair, `x` positive right, `y` positive down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pad {
    pub x: i8,
    pub y: i8,
}

impl Pad {
    pub fn buttons(self) -> PadButtons {
        PadButtons {
            up: self.y < 0,
            right: self.x > 0,
            down: self.y > 0,
            left: self.x < 0,
        }
    }
}

/// D-pad as four booleans. Diagonals set two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadButtons {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

/// All face and shoulder buttons read in one go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSnapshot {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
    pub back: bool,
    pub start: bool,
    /// Always `false` on layouts without a Guide slot
    pub guide: bool,
    pub left_stick: bool,
    pub right_stick: bool,
}

/// One frame of normalized controller state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    pub buttons: ButtonSnapshot,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub triggers: f32,
    pub pad: Pad,
}

/// One-way "has this trigger ever reported non-zero" latches
///
/// Split trigger axes report exactly 0 until they are first moved, which is
/// indistinguishable from half-pulled. Until a side has reported something
/// else, it is assumed to be at rest (-1). Once set, a latch never clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerState {
    pub left_seen_nonzero: bool,
    pub right_seen_nonzero: bool,
}

impl TriggerState {
    /// Latches on the given readings and returns the values to trust
    fn observe(&mut self, left: f32, right: f32) -> (f32, f32) {
        if left != 0.0 && !self.left_seen_nonzero {
            debug!("Left trigger reported {:.3}, trusting raw values from now on", left);
            self.left_seen_nonzero = true;
        }
        if right != 0.0 && !self.right_seen_nonzero {
            debug!("Right trigger reported {:.3}, trusting raw values from now on", right);
            self.right_seen_nonzero = true;
        }

        let left = if self.left_seen_nonzero { left } else { -1.0 };
        let right = if self.right_seen_nonzero { right } else { -1.0 };
        (left, right)
    }
}

/// Normalizing wrapper around a single raw gamepad
#[derive(Debug)]
pub struct ControllerAdapter<S> {
    source: S,
    profile: PlatformProfile,
    dead_zone: f32,
    triggers: TriggerState,
}

impl<S: RawInputSource> ControllerAdapter<S> {
    /// Builds an adapter for the host platform's layout
    ///
    /// # Errors
    ///
    /// * [`ControllerError::UnsupportedPlatform`] - host is not Linux, Windows or macOS
    /// * [`ControllerError::InvalidDeadZone`] - override outside `[0, 1)`
    pub fn new(source: S, dead_zone: Option<f32>) -> Result<Self, ControllerError> {
        let profile = PlatformProfile::for_host()?;
        Self::with_profile(source, profile, dead_zone)
    }

    /// Builds an adapter for an explicitly chosen layout
    pub fn with_layout(
        source: S,
        layout: Layout,
        dead_zone: Option<f32>,
    ) -> Result<Self, ControllerError> {
        Self::with_profile(source, layout.profile(), dead_zone)
    }

    fn with_profile(
        source: S,
        profile: PlatformProfile,
        dead_zone: Option<f32>,
    ) -> Result<Self, ControllerError> {
        let dead_zone = dead_zone.unwrap_or(DEFAULT_DEAD_ZONE);
        if !(0.0..1.0).contains(&dead_zone) {
            return Err(ControllerError::InvalidDeadZone { value: dead_zone });
        }

        info!(
            "Controller {} using {:?} layout with dead zone {}",
            source.id(),
            profile.layout(),
            dead_zone
        );

        Ok(Self {
            source,
            profile,
            dead_zone,
            triggers: TriggerState::default(),
        })
    }

    pub fn id(&self) -> usize {
        self.source.id()
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.triggers
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Access for refreshing the source between frames
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Whether a logical button is held. Buttons the layout lacks read `false`.
    pub fn pressed(&self, button: Button) -> bool {
        self.profile
            .button_index(button)
            .is_some_and(|index| self.source.button(index))
    }

    pub fn buttons(&self) -> ButtonSnapshot {
        ButtonSnapshot {
            a: self.pressed(Button::A),
            b: self.pressed(Button::B),
            x: self.pressed(Button::X),
            y: self.pressed(Button::Y),
            left_bumper: self.pressed(Button::LeftBumper),
            right_bumper: self.pressed(Button::RightBumper),
            back: self.pressed(Button::Back),
            start: self.pressed(Button::Start),
            guide: self.pressed(Button::Guide),
            left_stick: self.pressed(Button::LeftStickButton),
            right_stick: self.pressed(Button::RightStickButton),
        }
    }

    pub fn left_stick(&self) -> Stick {
        self.stick(Axis::LeftStickX, Axis::LeftStickY)
    }

    pub fn right_stick(&self) -> Stick {
        self.stick(Axis::RightStickX, Axis::RightStickY)
    }

    fn stick(&self, x: Axis, y: Axis) -> Stick {
        Stick {
            x: adjust(self.raw_axis(x), self.dead_zone),
            y: adjust(self.raw_axis(y), self.dead_zone),
        }
    }

    fn raw_axis(&self, axis: Axis) -> f32 {
        self.profile
            .axis_index(axis)
            .map_or(0.0, |index| self.source.axis(index))
    }

    /// Both triggers folded into one additive axis
    ///
    /// Left pull goes towards -1, right pull towards +1. On split-axis
    /// layouts this updates the first-use latches in [`TriggerState`].
    pub fn trigger_axis(&mut self) -> f32 {
        match self.profile.triggers() {
            TriggerAxes::Combined(index) => -self.source.axis(index),
            TriggerAxes::Split { left, right } => {
                let (left, right) = self
                    .triggers
                    .observe(self.source.axis(left), self.source.axis(right));
                (-left + right) / 2.0
            }
        }
    }

    /// D-pad as a signed pair
    pub fn pad(&self) -> Pad {
        match self.profile.dpad() {
            DPad::Hat(index) => {
                let (x, y) = self.source.hat(index);
                Pad {
                    x,
                    y: y.saturating_neg(),
                }
            }
            DPad::Buttons {
                up,
                down,
                left,
                right,
            } => {
                let read = |index| i8::from(self.source.button(index));
                Pad {
                    x: read(right) - read(left),
                    y: read(down) - read(up),
                }
            }
        }
    }

    pub fn pad_buttons(&self) -> PadButtons {
        self.pad().buttons()
    }

    /// Reads everything at once. Updates the trigger latches.
    pub fn state(&mut self) -> ControllerState {
        let triggers = self.trigger_axis();
        ControllerState {
            buttons: self.buttons(),
            left_stick: self.left_stick(),
            right_stick: self.right_stick(),
            triggers,
            pad: self.pad(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::MockSource;

    const EPS: f32 = 1e-5;

    fn adapter(layout: Layout) -> ControllerAdapter<MockSource> {
        ControllerAdapter::with_layout(MockSource::with_id(0), layout, None).unwrap()
    }

    #[test]
    fn default_dead_zone_is_applied() {
        let a = adapter(Layout::Alpha);
        assert_eq!(a.dead_zone(), DEFAULT_DEAD_ZONE);
    }

    #[test]
    fn rejects_dead_zone_out_of_range() {
        for zone in [-0.1, 1.0, 1.5, f32::NAN] {
            let result =
                ControllerAdapter::with_layout(MockSource::default(), Layout::Alpha, Some(zone));
            assert!(matches!(
                result,
                Err(ControllerError::InvalidDeadZone { .. })
            ));
        }
    }

    #[test]
    fn zero_dead_zone_is_allowed() {
        let mut a =
            ControllerAdapter::with_layout(MockSource::default(), Layout::Alpha, Some(0.0))
                .unwrap();
        a.source_mut().set_axis(0, 0.01);
        assert!((a.left_stick().x - 0.01).abs() < EPS);
    }

    #[test]
    fn left_stick_end_to_end() {
        let mut a = adapter(Layout::Alpha);
        a.source_mut().set_axis(0, 0.5);
        a.source_mut().set_axis(1, -0.05);
        let stick = a.left_stick();
        assert!((stick.x - 0.35 / 0.85).abs() < EPS);
        assert!((stick.x - 0.41).abs() < 0.01);
        assert_eq!(stick.y, 0.0);
    }

    #[test]
    fn right_stick_follows_layout_indices() {
        let mut beta = adapter(Layout::Beta);
        beta.source_mut().set_axis(4, 1.0);
        beta.source_mut().set_axis(3, -1.0);
        assert_eq!(beta.right_stick(), Stick { x: 1.0, y: -1.0 });

        let mut gamma = adapter(Layout::Gamma);
        gamma.source_mut().set_axis(2, -1.0);
        gamma.source_mut().set_axis(3, 1.0);
        assert_eq!(gamma.right_stick(), Stick { x: -1.0, y: 1.0 });
    }

    #[test]
    fn buttons_go_through_profile() {
        let mut a = adapter(Layout::Gamma);
        a.source_mut().set_button(11, true);
        a.source_mut().set_button(4, true);
        assert!(a.pressed(Button::A));
        assert!(a.pressed(Button::Start));
        assert!(!a.pressed(Button::Back));
        assert!(!a.pressed(Button::B));

        let snapshot = a.buttons();
        assert!(snapshot.a && snapshot.start);
        assert!(!snapshot.b && !snapshot.back && !snapshot.guide);
    }

    #[test]
    fn guide_only_on_alpha() {
        let mut alpha = adapter(Layout::Alpha);
        alpha.source_mut().set_button(8, true);
        assert!(alpha.pressed(Button::Guide));

        // Index 8 is the left stick button on Beta
        let mut beta = adapter(Layout::Beta);
        beta.source_mut().set_button(8, true);
        assert!(!beta.pressed(Button::Guide));
        assert!(beta.pressed(Button::LeftStickButton));
    }

    #[test]
    fn untouched_triggers_rest_at_center() {
        for layout in [Layout::Alpha, Layout::Gamma] {
            let mut a = adapter(layout);
            assert_eq!(a.trigger_axis(), 0.0);
            assert_eq!(a.trigger_state(), TriggerState::default());
        }
    }

    #[test]
    fn trigger_latch_trusts_zero_after_first_use() {
        let mut a = adapter(Layout::Alpha);
        a.source_mut().set_axis(2, 0.4);
        assert!((a.trigger_axis() - (-0.4 - 1.0) / 2.0).abs() < EPS);
        assert!(a.trigger_state().left_seen_nonzero);
        assert!(!a.trigger_state().right_seen_nonzero);

        a.source_mut().set_axis(2, 0.0);
        assert!((a.trigger_axis() - (-0.5)).abs() < EPS);
        assert!(a.trigger_state().left_seen_nonzero);
    }

    #[test]
    fn split_triggers_full_pull() {
        let mut a = adapter(Layout::Gamma);
        a.source_mut().set_axis(4, 1.0);
        a.source_mut().set_axis(5, -1.0);
        assert!((a.trigger_axis() + 1.0).abs() < EPS);

        a.source_mut().set_axis(4, -1.0);
        a.source_mut().set_axis(5, 1.0);
        assert!((a.trigger_axis() - 1.0).abs() < EPS);

        a.source_mut().set_axis(4, 1.0);
        assert!(a.trigger_axis().abs() < EPS);
    }

    #[test]
    fn combined_trigger_is_sign_flipped() {
        let mut a = adapter(Layout::Beta);
        a.source_mut().set_axis(2, 0.6);
        assert!((a.trigger_axis() + 0.6).abs() < EPS);
        assert_eq!(a.trigger_state(), TriggerState::default());
    }

    #[test]
    fn hat_y_is_flipped() {
        let mut a = adapter(Layout::Alpha);
        a.source_mut().set_hat(0, (1, 1));
        assert_eq!(a.pad(), Pad { x: 1, y: -1 });
        assert_eq!(
            a.pad_buttons(),
            PadButtons {
                up: true,
                right: true,
                down: false,
                left: false
            }
        );

        a.source_mut().set_hat(0, (0, 0));
        assert_eq!(a.pad(), Pad { x: 0, y: 0 });
        assert_eq!(a.pad_buttons(), PadButtons::default());
    }

    #[test]
    fn button_pad_matches_hat_convention() {
        let mut hat = adapter(Layout::Beta);
        hat.source_mut().set_hat(0, (-1, -1));

        let mut buttons = adapter(Layout::Gamma);
        buttons.source_mut().set_button(1, true); // down
        buttons.source_mut().set_button(2, true); // left

        assert_eq!(hat.pad(), Pad { x: -1, y: 1 });
        assert_eq!(buttons.pad(), hat.pad());
        assert_eq!(buttons.pad_buttons(), hat.pad_buttons());
    }

    #[test]
    fn opposing_pad_buttons_cancel() {
        let mut a = adapter(Layout::Gamma);
        a.source_mut().set_button(0, true);
        a.source_mut().set_button(1, true);
        assert_eq!(a.pad(), Pad { x: 0, y: 0 });
    }

    #[test]
    fn state_collects_everything() {
        let mut a = adapter(Layout::Alpha);
        a.source_mut().set_button(0, true);
        a.source_mut().set_axis(3, -1.0);
        a.source_mut().set_axis(5, 1.0);
        a.source_mut().set_hat(0, (0, -1));

        let state = a.state();
        assert!(state.buttons.a);
        assert_eq!(state.right_stick.x, -1.0);
        assert!((state.triggers - 1.0).abs() < EPS);
        assert_eq!(state.pad, Pad { x: 0, y: 1 });
        assert!(a.trigger_state().right_seen_nonzero);
    }

    #[test]
    fn adapters_keep_separate_latches() {
        let mut first =
            ControllerAdapter::with_layout(MockSource::with_id(0), Layout::Alpha, None).unwrap();
        let mut second =
            ControllerAdapter::with_layout(MockSource::with_id(1), Layout::Alpha, None).unwrap();

        first.source_mut().set_axis(5, 0.8);
        first.trigger_axis();
        second.trigger_axis();

        assert!(first.trigger_state().right_seen_nonzero);
        assert_eq!(second.trigger_state(), TriggerState::default());
        assert_eq!(first.id(), 0);
        assert_eq!(second.id(), 1);
    }
}
