//! Arithmetic demo library exported over the C ABI.
//!
//! The safe Rust API lives in [`arith`] and [`carray`]. The `extern "C"`
//! surface in [`ffi`] keeps the C conventions (sentinel `-1` for a negative
//! factorial), and [`interface`] renders the header and SWIG interface file
//! a binding generator consumes.

use thiserror::Error;

pub mod arith;
pub mod carray;
pub mod config;
pub mod ffi;
pub mod interface;

#[cfg(not(target_os = "windows"))]
pub mod loader;

pub use arith::{
    add, checked_factorial, checked_fibonacci, factorial, fibonacci, fibonacci_recursive, multiply,
};
pub use carray::{CArray, DoubleArray, Element, FloatArray, IntArray, UnsignedArray};
pub use config::{ArrayType, BindingConfig};
pub use interface::{generate_header, generate_swig_interface, write_bindings, GeneratedFile};

#[cfg(not(target_os = "windows"))]
pub use loader::{library_file_name, NativeLibrary};

#[derive(Error, Debug)]
pub enum FfiMathError {
    #[error("{op} is undefined for negative input {n}")]
    NegativeInput { op: &'static str, n: i32 },

    #[error("{op}({n}) overflows a 32-bit integer")]
    Overflow { op: &'static str, n: i32 },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot allocate array of {len} elements")]
    AllocationFailed { len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to load library: {0}")]
    LibraryLoad(String),
}

pub type Result<T> = std::result::Result<T, FfiMathError>;

/// Crate version as reported by the CLI and the generated header banner.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
