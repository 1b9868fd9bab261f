//! Initialization of application-wide resources.
//!
//! This module provides functions to initialize the logger and the
//! production collaborators before a run starts.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
