//! Aligned, unaligned, and streaming access modes, driven through the
//! mode-tag dispatch and backed by aligned heap buffers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lanewise::simd::mem::{stream_fence, AlignedMode, StreamingMode, UnalignedMode};
use lanewise::simd::unrolled::Simd;
use lanewise::utils::AlignedBuffer;

#[test]
fn aligned_roundtrip_preserves_lanes() {
    let mut rng = StdRng::seed_from_u64(55);

    let mut src = AlignedBuffer::<f32>::new(8, 64).unwrap();
    let mut dst = AlignedBuffer::<f32>::new(8, 64).unwrap();
    for slot in src.iter_mut() {
        *slot = rng.random_range(-10.0..10.0);
    }

    unsafe {
        let v: Simd<f32, 8> = Simd::load_with::<AlignedMode>(src.as_ptr());
        v.store_with::<AlignedMode>(dst.as_mut_ptr());
    }

    assert_eq!(&src[..], &dst[..]);
}

#[test]
fn unaligned_roundtrip_at_offset_one() {
    let data: [f64; 5] = [9.0, 1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0f64; 5];

    unsafe {
        let v: Simd<f64, 4> = Simd::load_with::<UnalignedMode>(data.as_ptr().add(1));
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);

        v.store_with::<UnalignedMode>(out.as_mut_ptr().add(1));
    }

    assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn streaming_store_lands_after_fence() {
    let mut src = AlignedBuffer::<f32>::new(16, 64).unwrap();
    let mut dst = AlignedBuffer::<f32>::new(16, 64).unwrap();
    for (i, slot) in src.iter_mut().enumerate() {
        *slot = i as f32 * 0.25;
    }

    unsafe {
        let v: Simd<f32, 16> = Simd::load_with::<StreamingMode>(src.as_ptr());
        v.store_with::<StreamingMode>(dst.as_mut_ptr());
    }
    stream_fence();

    assert_eq!(&src[..], &dst[..]);
}

#[test]
fn modes_are_interchangeable_on_aligned_memory() {
    let mut buf = AlignedBuffer::<f32>::new(8, 64).unwrap();
    for (i, slot) in buf.iter_mut().enumerate() {
        *slot = i as f32;
    }

    unsafe {
        let aligned: Simd<f32, 8> = Simd::load_with::<AlignedMode>(buf.as_ptr());
        let unaligned: Simd<f32, 8> = Simd::load_with::<UnalignedMode>(buf.as_ptr());
        let streamed: Simd<f32, 8> = Simd::load_with::<StreamingMode>(buf.as_ptr());

        assert_eq!(aligned, unaligned);
        assert_eq!(aligned, streamed);
    }
}

#[cfg(avx2)]
mod avx2 {
    use super::*;
    use lanewise::simd::avx2::f32x8::AVX_ALIGNMENT;
    use lanewise::simd::avx2::{F32x8, F64x4};
    use lanewise::simd::traits::Alignment;

    #[test]
    fn register_roundtrip_all_modes() {
        let mut rng = StdRng::seed_from_u64(59);

        let mut src = AlignedBuffer::<f32>::new(8, AVX_ALIGNMENT).unwrap();
        let mut dst = AlignedBuffer::<f32>::new(8, AVX_ALIGNMENT).unwrap();
        for slot in src.iter_mut() {
            *slot = rng.random_range(-10.0..10.0);
        }

        unsafe {
            let v = F32x8::load_with::<AlignedMode>(src.as_ptr());
            v.store_with::<AlignedMode>(dst.as_mut_ptr());
            assert_eq!(&src[..], &dst[..]);

            let v = F32x8::load_with::<StreamingMode>(src.as_ptr());
            v.store_with::<StreamingMode>(dst.as_mut_ptr());
        }
        stream_fence();
        assert_eq!(&src[..], &dst[..]);
    }

    #[test]
    fn f64x4_unaligned_mode_tolerates_offset_pointers() {
        let data: [f64; 5] = [0.5, 1.5, 2.5, 3.5, 4.5];
        let mut out = [0.0f64; 5];

        unsafe {
            let v = F64x4::load_with::<UnalignedMode>(data.as_ptr().add(1));
            v.store_with::<UnalignedMode>(out.as_mut_ptr().add(1));
        }

        assert_eq!(out[1..], data[1..]);
    }

    #[test]
    fn alignment_predicate_tracks_register_width() {
        let buf = AlignedBuffer::<f32>::new(16, AVX_ALIGNMENT).unwrap();

        assert!(F32x8::is_aligned(buf.as_ptr()));
        assert!(!F32x8::is_aligned(unsafe { buf.as_ptr().add(1) }));
    }
}

#[cfg(avx512)]
mod avx512 {
    use super::*;
    use lanewise::simd::avx512::f32x16::AVX512_ALIGNMENT;
    use lanewise::simd::avx512::F32x16;
    use lanewise::simd::traits::Alignment;

    #[test]
    fn register_roundtrip_all_modes() {
        let mut src = AlignedBuffer::<f32>::new(16, AVX512_ALIGNMENT).unwrap();
        let mut dst = AlignedBuffer::<f32>::new(16, AVX512_ALIGNMENT).unwrap();
        for (i, slot) in src.iter_mut().enumerate() {
            *slot = (i as f32).sin();
        }

        unsafe {
            let v = F32x16::load_with::<AlignedMode>(src.as_ptr());
            v.store_with::<AlignedMode>(dst.as_mut_ptr());
            assert_eq!(&src[..], &dst[..]);

            let v = F32x16::load_with::<StreamingMode>(src.as_ptr());
            v.store_with::<StreamingMode>(dst.as_mut_ptr());
        }
        stream_fence();
        assert_eq!(&src[..], &dst[..]);

        assert!(F32x16::is_aligned(src.as_ptr()));
        assert!(!F32x16::is_aligned(unsafe { src.as_ptr().add(8) }));
    }
}
