//! Numeric-mask comparisons and `cond` blending, including NaN handling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lanewise::simd::ops::cond;
use lanewise::simd::traits::{SimdCompare, SimdSelect};
use lanewise::simd::unrolled::Simd;

fn mask_bit(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[test]
fn comparisons_match_scalar_predicates() {
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..300 {
        // small integer range so equal lanes actually occur
        let xs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);
        let ys: [f32; 8] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);

        let a = Simd::from_lanes(xs);
        let b = Simd::from_lanes(ys);

        for i in 0..8 {
            assert_eq!(a.simd_eq(b)[i], mask_bit(xs[i] == ys[i]));
            assert_eq!(a.simd_ne(b)[i], mask_bit(xs[i] != ys[i]));
            assert_eq!(a.simd_lt(b)[i], mask_bit(xs[i] < ys[i]));
            assert_eq!(a.simd_le(b)[i], mask_bit(xs[i] <= ys[i]));
            assert_eq!(a.simd_gt(b)[i], mask_bit(xs[i] > ys[i]));
            assert_eq!(a.simd_ge(b)[i], mask_bit(xs[i] >= ys[i]));
        }
    }
}

#[test]
fn scalar_comparison_operands_match_vector_forms() {
    let mut rng = StdRng::seed_from_u64(29);

    for _ in 0..100 {
        let xs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);
        let s = rng.random_range(-4..4) as f32;

        let v = Simd::from_lanes(xs);

        assert_eq!(v.simd_lt(s).to_array(), v.simd_lt(Simd::splat(s)).to_array());
        assert_eq!(v.simd_eq(s).to_array(), v.simd_eq(Simd::splat(s)).to_array());
        assert_eq!(s.simd_ge(v).to_array(), Simd::splat(s).simd_ge(v).to_array());
        assert_eq!(s.simd_ne(v).to_array(), Simd::splat(s).simd_ne(v).to_array());

        for i in 0..8 {
            assert_eq!(v.simd_le(s)[i], mask_bit(xs[i] <= s));
            assert_eq!(s.simd_gt(v)[i], mask_bit(s > xs[i]));
        }
    }
}

#[test]
fn nan_compares_unequal_and_unordered() {
    let a = Simd::from_lanes([f32::NAN, f32::NAN, 1.0, 1.0]);
    let b = Simd::from_lanes([f32::NAN, 1.0, f32::NAN, 1.0]);

    assert_eq!(a.simd_eq(b).to_array(), [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(a.simd_ne(b).to_array(), [1.0, 1.0, 1.0, 0.0]);
    assert_eq!(a.simd_lt(b).to_array(), [0.0, 0.0, 0.0, 0.0]);
    assert_eq!(a.simd_ge(b).to_array(), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn cond_picks_pass_where_mask_is_one() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..100 {
        let xs: [f64; 8] = core::array::from_fn(|_| rng.random_range(-50.0..50.0));
        let ys: [f64; 8] = core::array::from_fn(|_| rng.random_range(-50.0..50.0));

        let a = Simd::from_lanes(xs);
        let b = Simd::from_lanes(ys);

        // lanewise max via compare + blend
        let max = cond(a.simd_ge(b), a, b).to_array();
        for i in 0..8 {
            assert_eq!(max[i], xs[i].max(ys[i]));
        }
    }
}

#[test]
fn chained_masks_combine_arithmetically() {
    let v = Simd::from_lanes([-2.0f32, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    // inside (0, 4): product of two masks is the logical AND
    let inside = v.simd_gt(Simd::splat(0.0)) * v.simd_lt(Simd::splat(4.0));
    assert_eq!(
        inside.to_array(),
        [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0]
    );

    let clamped = inside.cond(v, Simd::splat(0.0));
    assert_eq!(
        clamped.to_array(),
        [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0]
    );
}

#[cfg(avx2)]
mod avx2 {
    use super::*;
    use lanewise::simd::avx2::{F32x8, F64x4};

    #[test]
    fn f32x8_masks_match_unrolled_engine() {
        let mut rng = StdRng::seed_from_u64(31);

        for _ in 0..200 {
            let xs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);
            let ys: [f32; 8] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);

            let wide = F32x8::from_lanes(xs);
            let narrow = Simd::from_lanes(xs);
            let wide_rhs = F32x8::from_lanes(ys);
            let narrow_rhs = Simd::from_lanes(ys);

            assert_eq!(
                wide.simd_le(wide_rhs).to_array(),
                narrow.simd_le(narrow_rhs).to_array()
            );
            assert_eq!(
                wide.simd_ne(wide_rhs).to_array(),
                narrow.simd_ne(narrow_rhs).to_array()
            );
        }
    }

    #[test]
    fn f64x4_nan_masks_stay_numeric() {
        let a = F64x4::from_lanes([f64::NAN, 2.0, f64::NAN, 4.0]);
        let b = F64x4::splat(2.0);

        // every mask lane must be exactly 0.0 or 1.0, never a raw bit pattern
        for lane in a.simd_ne(b).to_array() {
            assert!(lane == 0.0 || lane == 1.0);
        }
        assert_eq!(a.simd_ne(b).to_array(), [1.0, 0.0, 1.0, 1.0]);

        let picked = cond(a.simd_eq(b), F64x4::splat(1.0), F64x4::splat(-1.0));
        assert_eq!(picked.to_array(), [-1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn f64x4_scalar_comparison_operands() {
        let v = F64x4::from_lanes([1.0, 2.0, 3.0, 4.0]);

        assert_eq!(v.simd_lt(3.0).to_array(), [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(3.0f64.simd_lt(v).to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            2.0f64.simd_le(v).to_array(),
            v.simd_ge(2.0).to_array()
        );
    }
}

#[cfg(avx512)]
mod avx512 {
    use super::*;
    use lanewise::simd::avx512::F32x16;

    #[test]
    fn f32x16_masks_match_unrolled_engine() {
        let mut rng = StdRng::seed_from_u64(37);

        for _ in 0..200 {
            let xs: [f32; 16] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);
            let ys: [f32; 16] = core::array::from_fn(|_| rng.random_range(-4..4) as f32);

            let wide = F32x16::from_lanes(xs).simd_gt(F32x16::from_lanes(ys));
            let narrow = Simd::from_lanes(xs).simd_gt(Simd::from_lanes(ys));

            assert_eq!(wide.to_array(), narrow.to_array());
        }
    }

    #[test]
    fn f32x16_scalar_comparison_operands() {
        let v = F32x16::from_fn(|i| i as f32);

        assert_eq!(
            v.simd_lt(8.0).to_array(),
            v.simd_lt(F32x16::splat(8.0)).to_array()
        );
        assert_eq!(v.simd_ge(8.0).to_array(), 8.0f32.simd_le(v).to_array());
    }
}
