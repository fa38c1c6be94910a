//! Client-side model of the medical institution registry.
//!
//! Everything here is independent of the rendering surface: the browser
//! front end and the terminal front end both drive the same view-model
//! through the same async operations.

pub mod actions;
pub mod api;
pub mod application;
pub mod config;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod filter;
pub mod form;
pub mod memory;
pub mod view;

pub use error::{ApiError, ConfigError, Result};
