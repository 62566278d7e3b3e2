#![forbid(unsafe_code)]

//! dotspy — classify known dotfiles in a home directory.
//!
//! A declarative JSON catalog describes the dotfiles and dotdirectories a
//! set of programs is known to create. dotspy walks that catalog against a
//! real directory tree and reports:
//!
//! 1. **What exists** — catalog entries whose real file/directory kind matches
//! 2. **Who owns it** — per-entry program ownership and a type tag
//!    (cache, config, history, install, key, log, session)
//! 3. **What looks stale** — sibling backup variants (`~`, `.bak`, `.old`, `.swp`)
//! 4. **What leaks** — history/key files with group/other permission bits set
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use dotspy::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use dotspy::catalog::loader::load_catalog;
//! use dotspy::scanner::walker::{WalkOptions, walk};
//! ```

pub mod prelude;

pub mod catalog;
pub mod core;
pub mod report;
pub mod scanner;
