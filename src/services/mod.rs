//! External process plumbing and process-wide setup

pub mod disassembler;
pub mod toolchain;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
