//! # modelgate Protocols
//!
//! The contract shared by every modelgate backend driver.
//! Contains the trait, result and error types, plus the small utilities
//! (filesystem access, content-type sniffing, HTTP client setup) that all
//! drivers need. No backend-specific code lives here.
//!
//! ## Core Types
//!
//! - [`Driver`] - Trait implemented once per LLM backend
//! - [`Completion`] - Text fragments plus token usage
//! - [`DriverError`] - Error returned by every driver operation
//! - [`FileSystem`] - Source of image files for image queries

pub mod driver;
pub mod error;
pub mod fs;
pub mod http;
pub mod media;
pub mod types;

pub use driver::{Driver, DriverOptions};
pub use error::{DriverError, ErrorKind, Operation};
pub use fs::{DirFs, FileSystem, MapFs};
pub use types::{Completion, Usage, STOP_PREFIX};
