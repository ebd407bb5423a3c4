//! # ANAR Core
//!
//! Frame-narrative analysis over normalized text. The crate consumes the
//! rule tables of `anar_rules` and produces typed, serializable results.
//!
//! ## Core Components
//!
//! - **narrative**: element extraction, the narrative graph, story segmentation
//!   and the character co-occurrence network
//! - **cultural**: cultural pattern detection, confidence scoring and context buckets
//! - **story_graph**: stories and cultural patterns combined in one graph
//! - **pipeline**: runs every stage over one document
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: identical text and rules give identical node ids, edges and scores
//! - **Stateless**: analyzers hold compiled rules only; every result is a fresh value
//! - **Data-driven**: every pattern and threshold comes from a rule book

pub mod cultural;
pub mod error;
pub mod input;
pub mod narrative;
pub mod pipeline;
pub mod story_graph;

pub use cultural::*;
pub use error::*;
pub use input::*;
pub use narrative::*;
pub use pipeline::*;
pub use story_graph::*;
