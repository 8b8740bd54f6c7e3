//! CLI command implementations.
//!
//! - [`register`] - Device registration
//! - [`unbind`] - License unbinding
//! - [`generate`] - Config generation from the account file

pub mod generate;
pub mod register;
pub mod unbind;

pub use generate::GenerateCommand;
pub use register::RegisterCommand;
pub use unbind::UnbindCommand;
