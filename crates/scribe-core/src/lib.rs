//! # Scribe Core
//!
//! The domain layer of the Scribe publishing backend: the draft document
//! model, metadata extraction, read-time estimation, validation and the
//! publish transition.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::{DomainError, PublishError, RepoError, ValidationError, ValidationReason};
