//! Loader option builders.
//!
//! Each adapter turns facade settings into the options object and file-match
//! rule for one bundler loader.

pub mod eslint;
