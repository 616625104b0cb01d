//! Core types and services for steady
//!
//! This crate provides configuration, logging, and the persona-scoped
//! conversation session core used by the steady server.

pub mod config;
pub mod error;
pub mod logging;
pub mod persona;

pub use error::{Error, Result};
