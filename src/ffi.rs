//! C ABI exports.
//!
//! Nothing here panics across the boundary. Errors become the in-band values
//! C callers expect: `-1` from `factorial` and `*_array_setitem`, `0` or a
//! null pointer from the array accessors.

use tracing::warn;

use crate::arith;
use crate::carray::{CArray, DoubleArray, FloatArray, IntArray, UnsignedArray};

#[no_mangle]
pub extern "C" fn add(a: i32, b: i32) -> i32 {
    arith::add(a, b)
}

#[no_mangle]
pub extern "C" fn multiply(a: f64, b: f64) -> f64 {
    arith::multiply(a, b)
}

/// Returns `-1` for negative `n`.
#[no_mangle]
pub extern "C" fn factorial(n: i32) -> i32 {
    arith::factorial(n).unwrap_or(-1)
}

#[no_mangle]
pub extern "C" fn fibonacci(n: i32) -> i32 {
    arith::fibonacci(n)
}

macro_rules! array_exports {
    ($array:ty, $elem:ty, $new:ident, $free:ident, $len:ident, $get:ident, $set:ident, $cast:ident) => {
        /// Allocates a zeroed array, or returns null when `len` elements
        /// cannot be allocated. Release it with the matching `_free`.
        #[no_mangle]
        pub extern "C" fn $new(len: usize) -> *mut $array {
            match CArray::<$elem>::try_new(len) {
                Ok(array) => Box::into_raw(Box::new(array)),
                Err(e) => {
                    warn!(function = stringify!($new), "{e}");
                    std::ptr::null_mut()
                }
            }
        }

        /// # Safety
        ///
        /// `array` must be null or a pointer returned by the matching `_new`
        /// that has not been freed yet.
        #[no_mangle]
        pub unsafe extern "C" fn $free(array: *mut $array) {
            if !array.is_null() {
                drop(Box::from_raw(array));
            }
        }

        /// # Safety
        ///
        /// `array` must be null or a live pointer from the matching `_new`.
        #[no_mangle]
        pub unsafe extern "C" fn $len(array: *const $array) -> usize {
            array.as_ref().map_or(0, CArray::len)
        }

        /// # Safety
        ///
        /// `array` must be null or a live pointer from the matching `_new`.
        #[no_mangle]
        pub unsafe extern "C" fn $get(array: *const $array, index: usize) -> $elem {
            let Some(array) = array.as_ref() else {
                warn!(function = stringify!($get), "null array handle");
                return <$elem>::default();
            };
            array.get(index).unwrap_or_else(|e| {
                warn!(function = stringify!($get), "{e}");
                <$elem>::default()
            })
        }

        /// Returns 0 on success, -1 on a null handle or out-of-range index.
        ///
        /// # Safety
        ///
        /// `array` must be null or a live pointer from the matching `_new`.
        #[no_mangle]
        pub unsafe extern "C" fn $set(array: *mut $array, index: usize, value: $elem) -> i32 {
            let Some(array) = array.as_mut() else {
                warn!(function = stringify!($set), "null array handle");
                return -1;
            };
            match array.set(index, value) {
                Ok(()) => 0,
                Err(e) => {
                    warn!(function = stringify!($set), "{e}");
                    -1
                }
            }
        }

        /// Pointer to the element storage, or null for a null handle.
        ///
        /// # Safety
        ///
        /// `array` must be null or a live pointer from the matching `_new`.
        /// The returned pointer is valid until the array is freed.
        #[no_mangle]
        pub unsafe extern "C" fn $cast(array: *mut $array) -> *mut $elem {
            array
                .as_mut()
                .map_or(std::ptr::null_mut(), CArray::as_mut_ptr)
        }
    };
}

array_exports!(
    DoubleArray,
    f64,
    double_array_new,
    double_array_free,
    double_array_len,
    double_array_getitem,
    double_array_setitem,
    double_array_cast
);

array_exports!(
    FloatArray,
    f32,
    float_array_new,
    float_array_free,
    float_array_len,
    float_array_getitem,
    float_array_setitem,
    float_array_cast
);

array_exports!(
    IntArray,
    i32,
    int_array_new,
    int_array_free,
    int_array_len,
    int_array_getitem,
    int_array_setitem,
    int_array_cast
);

array_exports!(
    UnsignedArray,
    u32,
    unsigned_array_new,
    unsigned_array_free,
    unsigned_array_len,
    unsigned_array_getitem,
    unsigned_array_setitem,
    unsigned_array_cast
);
