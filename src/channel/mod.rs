//! Channel layer for command execution over a console session.
//!
//! This module owns the accumulation buffer, the exclusive command
//! channel with its quiescence-based harvesting loop, control-sequence
//! sanitization, and failure-marker validation.

mod capture;
mod command;
pub mod sanitize;
pub mod validate;

pub use capture::CaptureBuffer;
pub use command::CommandChannel;
pub use sanitize::sanitize;
pub use validate::check_result;
