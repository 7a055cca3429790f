//! # Config Crate
//!
//! Centralized configuration constants for the Rust STEP pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_CHAR_PAGE_SIZE, DEFAULT_RECORD_PAGE_SIZE};
//!
//! // Use the defaults when no per-session override is given
//! let override_size: Option<usize> = None;
//! let char_page = override_size.unwrap_or(DEFAULT_CHAR_PAGE_SIZE);
//! assert_eq!(char_page, DEFAULT_CHAR_PAGE_SIZE);
//! assert!(DEFAULT_RECORD_PAGE_SIZE > 0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Tunable, Not Runtime-Adjustable**: page capacities are fixed when a
//!   parse session is constructed
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
