//! Core data model
//!
//! Everything in here is pure data: no processes, no host callbacks.

pub mod event;
pub mod line_map;
pub mod selection;
pub mod sentinel;
