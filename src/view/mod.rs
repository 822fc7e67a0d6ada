//! View and UI layer
//!
//! This module contains the bytecode panel surface and the components that
//! decide what it highlights and where it is scrolled.

pub mod highlight;
pub mod overlay;
pub mod surface;
pub mod viewport;
