//! Jarvis - command intent resolution and dispatch
//!
//! Free text goes in, a uniform `ActionResult` comes out. The ordered intent
//! table in `command::table` decides what a command means; capabilities in
//! `capability` perform the effect.

pub mod capability;
pub mod command;
pub mod core;

pub use capability::{Capabilities, CapabilityError};
pub use command::{ActionResult, Dispatcher, Intent};
pub use core::{JarvisConfig, JarvisError, Result};
