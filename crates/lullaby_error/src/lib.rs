//! Error types for the Lullaby story pipeline.
//!
//! This crate provides the foundation error types used throughout the Lullaby workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use lullaby_error::{LullabyResult, HttpError};
//!
//! fn fetch_story() -> LullabyResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_story() {
//!     Ok(story) => println!("Got: {}", story),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod input;
mod json;
mod models;
mod story;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{LullabyError, LullabyErrorKind, LullabyResult};
pub use http::HttpError;
pub use input::{InputError, InputErrorKind};
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use story::{StoryError, StoryErrorKind};
