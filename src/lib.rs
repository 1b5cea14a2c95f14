//! Helium: configuration store for an on-screen widget overlay
//!
//! This library provides:
//! - The widget set store and its persisted format
//! - Application settings and file-backed persistence
//! - Widget previews and weather location lookup parsing

pub mod config;
pub mod preview;
pub mod store;
pub mod weather;

// Re-export commonly used types
pub use config::{AppSettings, JsonFileGateway};
pub use preview::Preview;
pub use store::{StoreError, WidgetSetStore};
