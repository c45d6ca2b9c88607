//! Normalized Xbox 360 gamepad input.
//!
//! The same pad reports different raw button/axis/hat indices (and different
//! trigger and D-pad shapes) depending on the host driver. [`ControllerAdapter`]
//! hides that behind one set of logical accessors.
//!
//! ```rust,no_run
//! use gamepad_normalize::controller::{init_gilrs, ControllerAdapter, GilrsSource, Platform};
//!
//! # fn main() -> Result<(), gamepad_normalize::controller::ControllerError> {
//! let mut gilrs = init_gilrs()?;
//! let layout = Platform::current()?.layout();
//! let source = GilrsSource::open(&gilrs, 0, layout)?;
//! let layout = source.layout();
//! let mut pad = ControllerAdapter::with_layout(source, layout, None)?;
//!
//! loop {
//!     while gilrs.next_event().is_some() {}
//!     pad.source_mut().refresh(&gilrs);
//!     let stick = pad.left_stick();
//!     let triggers = pad.trigger_axis();
//!     println!("{stick:?} {triggers}");
//! }
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod demo;

pub use config::ControllerSettings;
pub use controller::{ControllerAdapter, ControllerError, RawInputSource};
