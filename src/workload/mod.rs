//! Command handlers for `init` and `run`.

pub mod init;
pub mod logging;
pub mod run;
pub mod signal;

pub use logging::mask_connection_password;
