//! Property tests for xact-numeric
//!
//! These tests check that lazy evaluation, views and the error-free
//! transformations agree with direct element-by-element computation.

use proptest::prelude::*;
use xact_numeric::prelude::*;
use xact_numeric::slice::{range_by, skip, SliceSpec};
use xact_numeric::{two_power, two_product, two_sum};

fn small_ints(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..1_000_000, 0..max_len)
}

/// Writes `fresh` through `spec`, reads the same view back and checks that
/// only the positions `touched` accepts changed.
fn write_then_read(
    values: &[i64],
    spec: SliceSpec,
    fresh: &[i64],
    touched: impl Fn(usize) -> bool,
) -> Result<(), TestCaseError> {
    let mut a = Array::from_slice(values);
    let n = a.slice(spec).len();
    let src = &fresh[..n];
    a.slice_mut(spec).copy_from_slice(src);

    prop_assert_eq!(a.slice(spec).to_array().into_vec(), src.to_vec());
    prop_assert_eq!(a.as_slice().iter().enumerate().filter(|(i, _)| touched(*i)).count(), n);
    for (i, (&now, &before)) in a.as_slice().iter().zip(values).enumerate() {
        if !touched(i) {
            prop_assert_eq!(now, before, "position {} outside the view changed", i);
        }
    }
    Ok(())
}

// ============================================================
// Expression properties
// ============================================================

proptest! {
    #[test]
    fn sum_distributes_over_addition(pairs in prop::collection::vec((-1_000_000i64..1_000_000, -1_000_000i64..1_000_000), 0..64)) {
        let (a, b): (Vec<i64>, Vec<i64>) = pairs.into_iter().unzip();
        let (a, b) = (Array::from_vec(a), Array::from_vec(b));
        prop_assert_eq!(sum(&a + &b), sum(&a) + sum(&b));
    }

    #[test]
    fn materialized_matches_elementwise(values in small_ints(64), k in -100i64..100) {
        let a = Array::from_vec(values.clone());
        let node = (&a * k - &a) + 3i64;
        let expected: Vec<i64> = values.iter().map(|&x| (x * k - x) + 3).collect();
        prop_assert_eq!(node.to_array().into_vec(), expected.clone());

        let mut out: Array<i64> = Array::new(values.len());
        out.assign(&node);
        prop_assert_eq!(out.into_vec(), expected);
    }

    #[test]
    fn reversal_is_an_involution(values in small_ints(32)) {
        let a = Array::from_vec(values);
        prop_assert_eq!(reverse(reverse(&a)).to_array(), a.clone());
        prop_assert_eq!(dot_prod(&a, reverse(&a)), dot_prod(reverse(&a), &a));
    }
}

// ============================================================
// View properties
// ============================================================

proptest! {
    #[test]
    fn nested_skip_matches_filter(
        values in small_ints(64),
        s1 in 0usize..8, k1 in 1usize..5,
        s2 in 0usize..8, k2 in 1usize..5,
    ) {
        let a = Array::from_vec(values.clone());
        let outer: Vec<i64> = values.iter().copied().skip(s1).step_by(k1).collect();
        let expected: Vec<i64> = outer.iter().copied().skip(s2).step_by(k2).collect();

        let nested = a.slice(skip(s1, k1)).slice(skip(s2, k2));
        prop_assert_eq!(nested.to_array().into_vec(), expected.clone());

        let mut b = a.clone();
        b.slice_mut(skip(s1, k1)).slice_mut(skip(s2, k2)).fill(i64::MIN);
        let written = b.as_slice().iter().filter(|&&x| x == i64::MIN).count();
        prop_assert_eq!(written, expected.len());
    }

    #[test]
    fn skip_write_reads_back(
        values in small_ints(64),
        fresh in prop::collection::vec(any::<i64>(), 64),
        start in 0usize..8, stride in 1usize..5,
    ) {
        write_then_read(&values, skip(start, stride), &fresh, |i| {
            i >= start && (i - start) % stride == 0
        })?;
    }

    #[test]
    fn range_write_reads_back(
        values in prop::collection::vec(-1_000_000i64..1_000_000, 1..64),
        fresh in prop::collection::vec(any::<i64>(), 64),
        ends in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
        stride in 1usize..5,
    ) {
        let (x, y) = (ends.0.index(values.len()), ends.1.index(values.len()));
        let (first, last) = (x.min(y), x.max(y));
        write_then_read(&values, range_by(first, last, stride), &fresh, |i| {
            i >= first && i <= last && (i - first) % stride == 0
        })?;
    }

    #[test]
    fn complement_matches_mask(mask in prop::collection::vec(any::<bool>(), 0..48)) {
        let a: Array<i64> = (0..mask.len() as i64).collect();
        let removed = IndexList::new(
            mask.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i),
        ).unwrap();
        let expected: Vec<i64> = mask
            .iter()
            .enumerate()
            .filter(|(_, &m)| !m)
            .map(|(i, _)| i as i64)
            .collect();

        prop_assert_eq!(without_ind(&a, removed.clone()).to_array().into_vec(), expected.clone());

        let mut erased = a.clone();
        erased.erase(&removed);
        prop_assert_eq!(erased.into_vec(), expected);
    }
}

// ============================================================
// Error-free transformation properties
// ============================================================

proptest! {
    #[test]
    fn two_product_is_exact(a in -(1i64 << 40)..(1i64 << 40), b in -(1i64 << 40)..(1i64 << 40)) {
        let pair = two_product(a as f64, b as f64);
        let exact = i128::from(a) * i128::from(b);
        prop_assert_eq!(pair.value as i128 + pair.residual as i128, exact);
    }

    #[test]
    fn two_sum_is_exact(a in -(1i64 << 60)..(1i64 << 60), b in -(1i64 << 20)..(1i64 << 20)) {
        let pair = two_sum(a as f64, b as f64);
        let exact = i128::from(a as f64 as i64) + i128::from(b);
        prop_assert_eq!(pair.value as i128 + pair.residual as i128, exact);
    }

    #[test]
    fn two_power_beats_plain_power(x in 2i64..2000, p in 6u32..12) {
        let pair = two_power(x as f64, p);
        let exact = i128::from(x).pow(p);
        let plain = (x as f64).powi(p as i32) as i128;
        let split = pair.value as i128 + pair.residual as i128;
        prop_assert!((split - exact).abs() <= (plain - exact).abs());
    }

    #[test]
    fn stable_sum_exact_for_integers(values in prop::collection::vec(-(1i64 << 52)..(1i64 << 52), 1..64)) {
        let a: Array<f64> = values.iter().map(|&x| x as f64).collect();
        let exact: i128 = values.iter().map(|&x| i128::from(x)).sum();
        let s = stable_sum(&a);
        prop_assert!((s as i128 - exact).abs() <= (exact.abs() >> 52) + 1);
    }
}
