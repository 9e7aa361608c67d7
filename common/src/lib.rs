//! Shared helpers for the coadd workspace: logging setup and config (de)serialization.

pub mod file_format;
pub mod log_setup;
pub mod serde;

pub use file_format::{FileExtensionError, FileFormatResult, SerdeFormat};
