//! C ABI exports of the compensated kernels.
//!
//! Every function reads caller-owned buffers of `len` elements and never
//! retains them. A null pointer or `len == 0` returns `0`.

use crate::compensated::{stable_dot_prod, stable_polynomial, stable_sum};
use crate::eft::two_product;

// ============================================================
// FFI Exports - f64
// ============================================================

/// Compensated sum
///
/// # Safety
/// - `ptr` must point to `len` valid f64 values
#[no_mangle]
pub unsafe extern "C" fn xact_stable_sum_f64(ptr: *const f64, len: usize) -> f64 {
    if ptr.is_null() || len == 0 {
        return 0.0;
    }
    let slice = std::slice::from_raw_parts(ptr, len);
    stable_sum(slice)
}

/// Compensated dot product
///
/// # Safety
/// - `a` and `b` must each point to `len` valid f64 values
#[no_mangle]
pub unsafe extern "C" fn xact_stable_dot_f64(a: *const f64, b: *const f64, len: usize) -> f64 {
    if a.is_null() || b.is_null() || len == 0 {
        return 0.0;
    }
    let a_slice = std::slice::from_raw_parts(a, len);
    let b_slice = std::slice::from_raw_parts(b, len);
    stable_dot_prod(a_slice, b_slice)
}

/// Error-free product: returns `fl(a * b)` and writes the residual
///
/// # Safety
/// - `residual` must be null or point to a writable f64
#[no_mangle]
pub unsafe extern "C" fn xact_two_prod_f64(a: f64, b: f64, residual: *mut f64) -> f64 {
    let pair = two_product(a, b);
    if !residual.is_null() {
        *residual = pair.residual;
    }
    pair.value
}

/// Compensated polynomial `sum(coef[i] * points[i]^exps[i])`
///
/// # Safety
/// - `coef` and `points` must each point to `len` valid f64 values
/// - `exps` must point to `len` valid u32 values
#[no_mangle]
pub unsafe extern "C" fn xact_stable_polynomial_f64(
    coef: *const f64,
    points: *const f64,
    exps: *const u32,
    len: usize,
) -> f64 {
    if coef.is_null() || points.is_null() || exps.is_null() || len == 0 {
        return 0.0;
    }
    let coef = std::slice::from_raw_parts(coef, len);
    let points = std::slice::from_raw_parts(points, len);
    let exps = std::slice::from_raw_parts(exps, len);
    stable_polynomial(coef, points, exps)
}

// ============================================================
// FFI Exports - f32
// ============================================================

/// Compensated sum
///
/// # Safety
/// - `ptr` must point to `len` valid f32 values
#[no_mangle]
pub unsafe extern "C" fn xact_stable_sum_f32(ptr: *const f32, len: usize) -> f32 {
    if ptr.is_null() || len == 0 {
        return 0.0;
    }
    let slice = std::slice::from_raw_parts(ptr, len);
    stable_sum(slice)
}

/// Compensated dot product
///
/// # Safety
/// - `a` and `b` must each point to `len` valid f32 values
#[no_mangle]
pub unsafe extern "C" fn xact_stable_dot_f32(a: *const f32, b: *const f32, len: usize) -> f32 {
    if a.is_null() || b.is_null() || len == 0 {
        return 0.0;
    }
    let a_slice = std::slice::from_raw_parts(a, len);
    let b_slice = std::slice::from_raw_parts(b, len);
    stable_dot_prod(a_slice, b_slice)
}

/// Error-free product: returns `fl(a * b)` and writes the residual
///
/// # Safety
/// - `residual` must be null or point to a writable f32
#[no_mangle]
pub unsafe extern "C" fn xact_two_prod_f32(a: f32, b: f32, residual: *mut f32) -> f32 {
    let pair = two_product(a, b);
    if !residual.is_null() {
        *residual = pair.residual;
    }
    pair.value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_stable_sum() {
        let data = [1.0e17, 1.0, -1.0e17, 1.0e17, 1.0, -1.0e17];
        let s = unsafe { xact_stable_sum_f64(data.as_ptr(), data.len()) };
        assert_eq!(s, 2.0);

        let data32 = [1.0e8f32, 1.0, -1.0e8];
        assert_eq!(unsafe { xact_stable_sum_f32(data32.as_ptr(), 3) }, 1.0);
    }

    #[test]
    fn test_ffi_null_and_empty() {
        assert_eq!(unsafe { xact_stable_sum_f64(std::ptr::null(), 4) }, 0.0);
        let data = [1.0f64];
        assert_eq!(unsafe { xact_stable_sum_f64(data.as_ptr(), 0) }, 0.0);
        assert_eq!(
            unsafe { xact_stable_dot_f32(std::ptr::null(), std::ptr::null(), 2) },
            0.0
        );
    }

    #[test]
    fn test_ffi_stable_dot() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let d = unsafe { xact_stable_dot_f64(a.as_ptr(), b.as_ptr(), 6) };
        assert_eq!(d, 56.0);
    }

    #[test]
    fn test_ffi_two_prod() {
        let a = 134_217_729.0f64;
        let mut residual = 0.0;
        let value = unsafe { xact_two_prod_f64(a, a, &mut residual) };
        assert_eq!(value, 18_014_398_777_917_440.0);
        assert_eq!(residual, 1.0);

        let value = unsafe { xact_two_prod_f32(3.0, 4.0, std::ptr::null_mut()) };
        assert_eq!(value, 12.0);
    }

    #[test]
    fn test_ffi_stable_polynomial() {
        let coef = [2.0, 3.0];
        let points = [10.0, 10.0];
        let exps = [1u32, 2];
        let p = unsafe {
            xact_stable_polynomial_f64(coef.as_ptr(), points.as_ptr(), exps.as_ptr(), 2)
        };
        assert_eq!(p, 320.0);
    }
}
