//! Command handlers for CLI operations

pub mod check;
pub mod send;

pub use check::CheckCommandHandler;
pub use send::SendCommandHandler;
