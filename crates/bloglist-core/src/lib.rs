//! # Bloglist Core
//!
//! The domain layer of the bloglist API.
//! This crate contains the blog/user model, the ports infrastructure must
//! implement, and the services that keep both collections consistent.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
