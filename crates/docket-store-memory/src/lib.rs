//! In-memory backend for Docket.
//!
//! Implements the subject catalog, saved-document provider and commit sink
//! over shared in-process state, with an optional simulated save latency.

mod demo;
mod store;

pub mod error;

pub use demo::{ANA, CARLOS, JOAO, MARIA};
pub use error::{Error, Result};
pub use store::MemoryBackend;

#[cfg(test)]
mod tests;
