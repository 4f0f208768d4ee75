//! Loads a built `ffimath` shared library the way a foreign host would and
//! calls through its exported symbols.

use libloading::{Library, Symbol};
use std::path::Path;
use tracing::debug;

use crate::{FfiMathError, Result};

type AddFn = extern "C" fn(i32, i32) -> i32;
type MultiplyFn = extern "C" fn(f64, f64) -> f64;
type UnaryFn = extern "C" fn(i32) -> i32;

/// Platform file name of the cdylib, e.g. `libffimath.so`.
pub fn library_file_name() -> String {
    libloading::library_filename("ffimath")
        .to_string_lossy()
        .to_string()
}

pub struct NativeLibrary {
    add: AddFn,
    multiply: MultiplyFn,
    factorial: UnaryFn,
    fibonacci: UnaryFn,
    // Keeps the resolved function pointers valid.
    _library: Library,
}

impl NativeLibrary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading native library");

        // SAFETY: loading runs the library's initialisers; callers point this
        // at an ffimath build, whose symbols match the signatures below.
        unsafe {
            let library = Library::new(path)
                .map_err(|e| FfiMathError::LibraryLoad(format!("{}: {e}", path.display())))?;

            let add = *resolve::<AddFn>(&library, b"add\0")?;
            let multiply = *resolve::<MultiplyFn>(&library, b"multiply\0")?;
            let factorial = *resolve::<UnaryFn>(&library, b"factorial\0")?;
            let fibonacci = *resolve::<UnaryFn>(&library, b"fibonacci\0")?;

            Ok(Self {
                add,
                multiply,
                factorial,
                fibonacci,
                _library: library,
            })
        }
    }

    pub fn add(&self, a: i32, b: i32) -> i32 {
        (self.add)(a, b)
    }

    pub fn multiply(&self, a: f64, b: f64) -> f64 {
        (self.multiply)(a, b)
    }

    /// Calls the exported `factorial`, which returns `-1` for negative `n`.
    pub fn factorial(&self, n: i32) -> i32 {
        (self.factorial)(n)
    }

    pub fn fibonacci(&self, n: i32) -> i32 {
        (self.fibonacci)(n)
    }
}

unsafe fn resolve<'lib, T>(library: &'lib Library, name: &[u8]) -> Result<Symbol<'lib, T>> {
    library.get(name).map_err(|e| {
        let symbol = String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name)).to_string();
        FfiMathError::LibraryLoad(format!("missing symbol '{symbol}': {e}"))
    })
}
