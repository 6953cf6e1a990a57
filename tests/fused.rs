//! Fused multiply-add family: sign conventions and the single-rounding
//! guarantee, checked against `f32::mul_add` / `f64::mul_add`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lanewise::simd::ops::{fma, fms, fnma, fnms};
use lanewise::simd::unrolled::Simd;

#[test]
fn fused_family_matches_scalar_mul_add() {
    let mut rng = StdRng::seed_from_u64(101);

    for _ in 0..300 {
        let xs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
        let ys: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
        let zs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));

        let a = Simd::from_lanes(xs);
        let b = Simd::from_lanes(ys);
        let c = Simd::from_lanes(zs);

        let madd = fma(a, b, c).to_array();
        let msub = fms(a, b, c).to_array();
        let nmadd = fnma(a, b, c).to_array();
        let nmsub = fnms(a, b, c).to_array();
        for i in 0..8 {
            assert_eq!(madd[i], xs[i].mul_add(ys[i], zs[i]));
            assert_eq!(msub[i], xs[i].mul_add(ys[i], -zs[i]));
            assert_eq!(nmadd[i], (-xs[i]).mul_add(ys[i], zs[i]));
            assert_eq!(nmsub[i], (-xs[i]).mul_add(ys[i], -zs[i]));
        }
    }
}

#[test]
fn fma_rounds_once() {
    // (1 + eps)(1 - eps) - 1 = -eps^2, which a separate multiply and add
    // rounds away to zero
    let x = 1.0f64 + f64::EPSILON;
    let y = 1.0f64 - f64::EPSILON;

    let fused = fma(Simd::splat(x), Simd::splat(y), Simd::<f64, 4>::splat(-1.0));
    assert_eq!(fused[0], -f64::EPSILON * f64::EPSILON);
    assert_ne!(fused[0], x * y - 1.0);
}

#[cfg(avx2)]
mod avx2 {
    use super::*;
    use lanewise::simd::avx2::{F32x8, F64x4};

    #[test]
    fn f32x8_fused_matches_scalar_mul_add() {
        let mut rng = StdRng::seed_from_u64(103);

        for _ in 0..300 {
            let xs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
            let ys: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
            let zs: [f32; 8] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));

            let a = F32x8::from_lanes(xs);
            let b = F32x8::from_lanes(ys);
            let c = F32x8::from_lanes(zs);

            let madd = fma(a, b, c).to_array();
            let nmsub = fnms(a, b, c).to_array();
            for i in 0..8 {
                assert_eq!(madd[i], xs[i].mul_add(ys[i], zs[i]));
                assert_eq!(nmsub[i], (-xs[i]).mul_add(ys[i], -zs[i]));
            }
        }
    }

    #[test]
    fn f64x4_hardware_fma_rounds_once() {
        let x = 1.0f64 + f64::EPSILON;
        let y = 1.0f64 - f64::EPSILON;

        let fused = fma(F64x4::splat(x), F64x4::splat(y), F64x4::splat(-1.0));
        assert_eq!(fused[0], -f64::EPSILON * f64::EPSILON);
    }
}

#[cfg(avx512)]
mod avx512 {
    use super::*;
    use lanewise::simd::avx512::F32x16;

    #[test]
    fn f32x16_fused_matches_scalar_mul_add() {
        let mut rng = StdRng::seed_from_u64(107);

        for _ in 0..200 {
            let xs: [f32; 16] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
            let ys: [f32; 16] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));
            let zs: [f32; 16] = core::array::from_fn(|_| rng.random_range(-100.0..100.0));

            let madd = fma(
                F32x16::from_lanes(xs),
                F32x16::from_lanes(ys),
                F32x16::from_lanes(zs),
            )
            .to_array();
            let msub = fms(
                F32x16::from_lanes(xs),
                F32x16::from_lanes(ys),
                F32x16::from_lanes(zs),
            )
            .to_array();
            let nmadd = fnma(
                F32x16::from_lanes(xs),
                F32x16::from_lanes(ys),
                F32x16::from_lanes(zs),
            )
            .to_array();
            for i in 0..16 {
                assert_eq!(madd[i], xs[i].mul_add(ys[i], zs[i]));
                assert_eq!(msub[i], xs[i].mul_add(ys[i], -zs[i]));
                assert_eq!(nmadd[i], (-xs[i]).mul_add(ys[i], zs[i]));
            }
        }
    }
}
