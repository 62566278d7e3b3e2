//! Known-file catalog: in-memory model and JSON loading.

pub mod loader;
pub mod model;
