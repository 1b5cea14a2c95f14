//! Widget set storage: persisted format and the in-memory store.

pub mod codec;
mod widget_store;

pub use widget_store::{StoreError, WidgetSetStore};
