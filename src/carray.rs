//! Fixed-length typed arrays shared with C callers.
//!
//! These are the counterparts of the classes SWIG's `carrays.i` generates
//! (`DoubleArray`, `FloatArray`, `IntArray`, `UnsignedArray`): a buffer that
//! is allocated once, zero-filled, indexed with bounds checks on the Rust
//! side, and handed to C as a plain pointer.

use std::fmt::Debug;

use crate::{FfiMathError, Result};

mod sealed {
    pub trait Sealed {}

    impl Sealed for f64 {}
    impl Sealed for f32 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
}

/// Scalar types that can live in a [`CArray`].
pub trait Element: sealed::Sealed + Copy + Default + PartialEq + Debug + 'static {
    /// Spelling of the type in C source.
    const C_TYPE: &'static str;
    /// Name of the wrapper class emitted for this type.
    const CLASS_NAME: &'static str;
}

impl Element for f64 {
    const C_TYPE: &'static str = "double";
    const CLASS_NAME: &'static str = "DoubleArray";
}

impl Element for f32 {
    const C_TYPE: &'static str = "float";
    const CLASS_NAME: &'static str = "FloatArray";
}

impl Element for i32 {
    const C_TYPE: &'static str = "int";
    const CLASS_NAME: &'static str = "IntArray";
}

impl Element for u32 {
    const C_TYPE: &'static str = "unsigned int";
    const CLASS_NAME: &'static str = "UnsignedArray";
}

#[derive(Debug, Clone, PartialEq)]
pub struct CArray<T: Element> {
    items: Box<[T]>,
}

pub type DoubleArray = CArray<f64>;
pub type FloatArray = CArray<f32>;
pub type IntArray = CArray<i32>;
pub type UnsignedArray = CArray<u32>;

impl<T: Element> CArray<T> {
    /// Allocates `len` zeroed elements.
    pub fn new(len: usize) -> Self {
        Self {
            items: vec![T::default(); len].into_boxed_slice(),
        }
    }

    /// Like [`CArray::new`], but reports an oversized request as
    /// [`FfiMathError::AllocationFailed`] instead of panicking.
    pub fn try_new(len: usize) -> Result<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(len)
            .map_err(|_| FfiMathError::AllocationFailed { len })?;
        items.resize(len, T::default());
        Ok(Self {
            items: items.into_boxed_slice(),
        })
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self {
            items: values.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.items
            .get(index)
            .copied()
            .ok_or(FfiMathError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(FfiMathError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Raw pointer to the first element, the equivalent of SWIG's `cast()`.
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.items.as_mut_ptr()
    }
}

impl<T: Element> From<Vec<T>> for CArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            items: values.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let arr = IntArray::new(4);
        assert_eq!(arr.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn cast_points_at_first_element() {
        let mut arr = DoubleArray::new(10);
        arr.set(0, 123.456).unwrap();
        let ptr = arr.as_ptr();
        assert!(!ptr.is_null());
        assert_eq!(unsafe { *ptr }, 123.456);
    }

    #[test]
    fn class_names_match_carrays() {
        assert_eq!(<f64 as Element>::CLASS_NAME, "DoubleArray");
        assert_eq!(<u32 as Element>::C_TYPE, "unsigned int");
    }
}
