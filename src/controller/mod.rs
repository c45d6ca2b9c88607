//! Controller normalization layer
//!
//! Turns one gamepad's raw, driver-specific button/axis/hat indices into a
//! stable logical API:
//!
//! 1. [`profile`] - per-platform index tables and platform detection
//! 2. [`deadzone`] - stick dead-zone remapping
//! 3. [`adapter`] - the [`ControllerAdapter`] accessor surface, trigger
//!    reconstruction and D-pad normalization
//! 4. [`source`] - the [`RawInputSource`] seam the adapter reads from
//! 5. [`gilrs_source`] - a concrete source backed by gilrs
//!
//! # Architecture
//!
//! ```text
//! gilrs ──► GilrsSource ──► ControllerAdapter ──► Stick / Pad / trigger axis / buttons
//!           (raw indices)   (PlatformProfile)
//! ```

pub mod adapter;
pub mod deadzone;
pub mod error;
pub mod gilrs_source;
pub mod profile;
pub mod source;

pub use adapter::{
    ButtonSnapshot, ControllerAdapter, ControllerState, Pad, PadButtons, Stick, TriggerState,
};
pub use deadzone::{adjust, DEFAULT_DEAD_ZONE};
pub use error::ControllerError;
pub use gilrs_source::{gamepad_count, init_gilrs, GilrsSource};
pub use profile::{Axis, Button, DPad, Layout, Platform, PlatformProfile, TriggerAxes};
pub use source::RawInputSource;
