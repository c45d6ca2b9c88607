//! Per-platform raw index tables
//!
//! The same physical Xbox 360 pad enumerates its buttons and axes differently
//! depending on the host driver. Each supported driver family gets one fixed
//! [`PlatformProfile`]; an adapter picks one at construction and keeps it.
//!
//! ```text
//! Logical          Alpha (Linux)   Beta (Windows)   Gamma (macOS)
//! A/B/X/Y          0/1/2/3         0/1/2/3          11/12/13/14
//! LB/RB            4/5             4/5              8/9
//! Back/Start       6/7             6/7              5/4
//! Guide            8               -                -
//! LS/RS button     9/10            8/9              6/7
//! Left stick X/Y   0/1             0/1              0/1
//! Right stick X/Y  3/4             4/3              2/3
//! Triggers         axes 2, 5       combined axis 2  axes 4, 5
//! D-pad            hat 0           hat 0            buttons 0-3
//! ```

use serde::{Deserialize, Serialize};

use super::error::ControllerError;

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
}

impl Platform {
    /// Detects the platform this binary was built for
    pub fn current() -> Result<Self, ControllerError> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Classifies an OS name by prefix (`"linux"`, `"win32"`, `"darwin"`, `"macos"`, ...)
    pub fn from_os_name(os: &str) -> Result<Self, ControllerError> {
        let lower = os.to_ascii_lowercase();
        if lower.starts_with("lin") {
            Ok(Platform::Linux)
        } else if lower.starts_with("darwin") || lower.starts_with("macos") {
            Ok(Platform::MacOs)
        } else if lower.starts_with("win") {
            Ok(Platform::Windows)
        } else {
            Err(ControllerError::UnsupportedPlatform { os: os.to_string() })
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Platform::Linux => Layout::Alpha,
            Platform::Windows => Layout::Beta,
            Platform::MacOs => Layout::Gamma,
        }
    }
}

/// Raw hardware/driver layout
///
/// The layouts differ structurally (trigger and D-pad representation), not
/// only by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// xpad/joydev ordering: independent trigger axes, combined hat
    Alpha,
    /// DirectInput ordering: one additive trigger axis, combined hat
    Beta,
    /// 360Controller driver ordering: independent trigger axes, D-pad as buttons
    Gamma,
}

impl Layout {
    pub fn profile(self) -> PlatformProfile {
        match self {
            Layout::Alpha => ALPHA,
            Layout::Beta => BETA,
            Layout::Gamma => GAMMA,
        }
    }
}

/// Logical buttons exposed by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    Guide,
    LeftStickButton,
    RightStickButton,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    /// Every logical button except the D-pad directions, which are read
    /// through the pad accessors
    pub const FACE_AND_SHOULDER: [Button; 11] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Back,
        Button::Start,
        Button::Guide,
        Button::LeftStickButton,
        Button::RightStickButton,
    ];
}

/// Logical axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    /// Single additive trigger axis (Beta only)
    Triggers,
    LeftTrigger,
    RightTrigger,
}

/// How the triggers are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAxes {
    /// One axis carrying both triggers, left pull positive
    Combined(usize),
    /// One axis per trigger, -1 at rest and +1 fully pulled (0 before first use)
    Split { left: usize, right: usize },
}

/// How the directional pad is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DPad {
    /// A two-component hat device, +1 meaning up on the y component
    Hat(usize),
    /// Four independent buttons
    Buttons {
        up: usize,
        down: usize,
        left: usize,
        right: usize,
    },
}

/// Immutable logical → raw index table for one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    layout: Layout,
    face: [usize; 4],
    bumpers: (usize, usize),
    back: usize,
    start: usize,
    guide: Option<usize>,
    stick_buttons: (usize, usize),
    left_stick: (usize, usize),
    right_stick: (usize, usize),
    triggers: TriggerAxes,
    dpad: DPad,
}

const ALPHA: PlatformProfile = PlatformProfile {
    layout: Layout::Alpha,
    face: [0, 1, 2, 3],
    bumpers: (4, 5),
    back: 6,
    start: 7,
    guide: Some(8),
    stick_buttons: (9, 10),
    left_stick: (0, 1),
    right_stick: (3, 4),
    triggers: TriggerAxes::Split { left: 2, right: 5 },
    dpad: DPad::Hat(0),
};

const BETA: PlatformProfile = PlatformProfile {
    layout: Layout::Beta,
    face: [0, 1, 2, 3],
    bumpers: (4, 5),
    back: 6,
    start: 7,
    guide: None,
    stick_buttons: (8, 9),
    left_stick: (0, 1),
    right_stick: (4, 3),
    triggers: TriggerAxes::Combined(2),
    dpad: DPad::Hat(0),
};

const GAMMA: PlatformProfile = PlatformProfile {
    layout: Layout::Gamma,
    face: [11, 12, 13, 14],
    bumpers: (8, 9),
    back: 5,
    start: 4,
    guide: None,
    stick_buttons: (6, 7),
    left_stick: (0, 1),
    right_stick: (2, 3),
    triggers: TriggerAxes::Split { left: 4, right: 5 },
    dpad: DPad::Buttons {
        up: 0,
        down: 1,
        left: 2,
        right: 3,
    },
};

impl PlatformProfile {
    /// Resolves the profile for the host platform
    pub fn for_host() -> Result<Self, ControllerError> {
        Ok(Platform::current()?.layout().profile())
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn triggers(&self) -> TriggerAxes {
        self.triggers
    }

    pub fn dpad(&self) -> DPad {
        self.dpad
    }

    /// Raw button index, or `None` if this layout has no such button
    pub fn button_index(&self, button: Button) -> Option<usize> {
        match button {
            Button::A => Some(self.face[0]),
            Button::B => Some(self.face[1]),
            Button::X => Some(self.face[2]),
            Button::Y => Some(self.face[3]),
            Button::LeftBumper => Some(self.bumpers.0),
            Button::RightBumper => Some(self.bumpers.1),
            Button::Back => Some(self.back),
            Button::Start => Some(self.start),
            Button::Guide => self.guide,
            Button::LeftStickButton => Some(self.stick_buttons.0),
            Button::RightStickButton => Some(self.stick_buttons.1),
            Button::DPadUp => self.dpad_button(|up, _, _, _| up),
            Button::DPadDown => self.dpad_button(|_, down, _, _| down),
            Button::DPadLeft => self.dpad_button(|_, _, left, _| left),
            Button::DPadRight => self.dpad_button(|_, _, _, right| right),
        }
    }

    /// Raw axis index, or `None` if this layout reports the axis differently
    pub fn axis_index(&self, axis: Axis) -> Option<usize> {
        match (axis, self.triggers) {
            (Axis::LeftStickX, _) => Some(self.left_stick.0),
            (Axis::LeftStickY, _) => Some(self.left_stick.1),
            (Axis::RightStickX, _) => Some(self.right_stick.0),
            (Axis::RightStickY, _) => Some(self.right_stick.1),
            (Axis::Triggers, TriggerAxes::Combined(index)) => Some(index),
            (Axis::LeftTrigger, TriggerAxes::Split { left, .. }) => Some(left),
            (Axis::RightTrigger, TriggerAxes::Split { right, .. }) => Some(right),
            _ => None,
        }
    }

    fn dpad_button(&self, pick: impl Fn(usize, usize, usize, usize) -> usize) -> Option<usize> {
        match self.dpad {
            DPad::Buttons {
                up,
                down,
                left,
                right,
            } => Some(pick(up, down, left, right)),
            DPad::Hat(_) => None,
        }
    }
}
