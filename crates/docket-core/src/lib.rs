//! Core types and state machines for the Docket document staging screen.
//!
//! This crate is deliberately free of runtime, logging and storage
//! dependencies. Backends implement the traits in [`provider`]; front ends
//! drive a [`staging::StagingStore`] through a [`guard::SubjectGuard`].

pub mod admission;
pub mod document;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod provider;
pub mod staging;
pub mod subject;

pub use error::{Error, Result};
