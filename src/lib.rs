//! Comedy video catalog.
//!
//! Comedians own videos, videos carry tags, and visitors submit links for
//! review. Public reads only ever see active videos; a background job
//! promotes ready videos to active one at a time.

pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod models;
pub mod services;
pub mod store;

pub use error::{AppError, Result};
