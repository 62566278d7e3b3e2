//! Classification engine: catalog-driven walker, backup inference, permission check.

pub mod backups;
pub mod security;
pub mod walker;
