//! # ANAR Rules
//!
//! The "Rule Book" crate - holds every rule table the analysis core consumes:
//! regex rules for characters, events, frame markers and cultural markers,
//! the literal cultural-pattern table, corroborating-signal vocabulary and
//! scoring parameters. Tables are plain data and can be loaded from TOML.
//!
//! This crate contains no narrative logic. It compiles rules into a
//! [`PatternMatcher`] and reports malformed tables as [`ConfigError`].

pub mod config;
pub mod cultural;
pub mod error;
pub mod rules;
pub mod text;

pub use config::*;
pub use cultural::*;
pub use error::*;
pub use rules::*;
pub use text::*;
