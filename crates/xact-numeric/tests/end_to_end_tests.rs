//! End-to-end scenarios
//!
//! Each test walks one array through construction, views, lazy expressions,
//! writes and reductions, the way calling code uses the crate.

use xact_numeric::prelude::*;
use xact_numeric::slice::{even, last, odd, range};

fn sample() -> Array<f64> {
    Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
}

// ============================================================
// Scenarios
// ============================================================

mod scenarios {
    use super::*;

    #[test]
    fn test_reverse_dot() {
        let a = sample();
        assert_eq!(stable_dot_prod(&a, reverse(&a)), 56.0);
        assert_eq!(dot_prod(&a, reverse(&a)), 56.0);
    }

    #[test]
    fn test_read_then_write_evens() {
        let mut a = sample();
        assert_eq!(a.slice(even()).to_array().as_slice(), &[1.0, 3.0, 5.0]);

        a.slice_mut(even()).assign(-1.0);
        assert_eq!(a.as_slice(), &[-1.0, 2.0, -1.0, 4.0, -1.0, 6.0]);
        assert_eq!(sum(&a), 9.0);
    }

    #[test]
    fn test_polynomial_both_ways() {
        let coef = Array::from_vec(vec![2.0, 3.0]);
        let points = Array::filled(2, 10.0);
        let exps = Array::from_vec(vec![1u32, 2]);
        assert_eq!(polynomial(&coef, &points, &exps), 320.0);
        assert_eq!(stable_polynomial(&coef, &points, &exps), 320.0);
    }

    #[test]
    fn test_spec_reused_across_resize() {
        let tail = range(1, last());
        let mut a = sample();
        assert_eq!(sum(a.slice(tail)), 20.0);

        a.resize(8);
        a[7] = 10.0;
        assert_eq!(a.slice(tail).len(), 7);
        assert_eq!(sum(a.slice(tail)), 30.0);
    }

    #[test]
    fn test_swap_halves_through_views() {
        let mut a = sample();
        let odds = a.slice(odd()).to_array();
        let evens = a.slice(even()).to_array();
        a.slice_mut(even()).assign(&odds);
        a.slice_mut(odd()).assign(&evens);
        assert_eq!(a.as_slice(), &[2.0, 1.0, 4.0, 3.0, 6.0, 5.0]);
    }

    #[test]
    fn test_normalize_in_place() {
        let mut a = Array::from_vec(vec![3.0f64, 0.0, -4.0]);
        let n = stable_norm2(&a);
        a /= n;
        assert_eq!(a.as_slice(), &[0.6, 0.0, -0.8]);
        assert!((stable_norm2(&a) - 1.0).abs() < 1.0e-15);
    }

    #[test]
    fn test_filter_out_extremes() {
        let a = Array::from_vec(vec![7, -3, 4, 12, 0]);
        let lo = min_index(&a).unwrap();
        let hi = max_index(&a).unwrap();
        let mut drop = vec![lo, hi];
        drop.sort_unstable();
        let middle = without_ind(&a, IndexList::new(drop).unwrap());
        assert_eq!(middle.to_array().as_slice(), &[7, 4, 0]);
        assert_eq!(sum(&middle), 11);
    }

    #[test]
    fn test_mixed_kinds_need_cast() {
        let counts = Array::from_vec(vec![1u32, 2, 3]);
        let weights = Array::from_vec(vec![0.5, 0.25, 0.125]);
        let as_float: Array<f64> = counts.cast().unwrap();
        assert_eq!(dot_prod(&as_float, &weights), 1.375);

        let too_big = Array::from_vec(vec![300i32]);
        assert!(too_big.cast::<u8>().is_err());
    }
}
