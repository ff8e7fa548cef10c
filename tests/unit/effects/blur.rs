use super::*;

#[test]
fn radius_is_three_sigma_rounded_up() {
    assert_eq!(radius_for_sigma(0.0), 0);
    assert_eq!(radius_for_sigma(0.2), 1);
    assert_eq!(radius_for_sigma(1.0), 3);
    assert_eq!(radius_for_sigma(10.0), 30);
    assert_eq!(radius_for_sigma(f32::NAN), 0);
}

#[test]
fn blur_sigma_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 1.0).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((230..=280).contains(&sum_a), "{sum_a}");
    assert!(out.chunks_exact(4).all(|px| px[0] <= px[3]));
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1.0).is_err());
}

#[test]
fn kernel_is_symmetric_and_normalized() {
    assert!(GaussianKernel::for_sigma(0.0).is_none());
    let k = GaussianKernel::for_sigma(1.5).unwrap();
    assert_eq!(k.radius(), 5);
    let w = k.weights();
    assert_eq!(w.len(), 11);
    assert_eq!(w.iter().sum::<u32>(), 1 << 16);
    for i in 0..w.len() / 2 {
        assert_eq!(w[i], w[w.len() - 1 - i]);
        assert!(w[i] <= w[i + 1]);
    }
}

#[test]
fn blur_is_separable_on_non_square_buffers() {
    // A vertical line on a 7x3 buffer spreads horizontally only.
    let (w, h) = (7u32, 3u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        let i = ((y * w + 3) * 4) as usize;
        src[i..i + 4].copy_from_slice(&[200, 200, 200, 200]);
    }
    let out = blur_rgba8_premul(&src, w, h, 1.0).unwrap();
    for x in 0..w as usize {
        let column: Vec<u8> = (0..h as usize).map(|y| out[(y * w as usize + x) * 4 + 3]).collect();
        assert!(column.iter().all(|&a| a == column[0]), "{column:?}");
    }
    assert!(out[(3 * 4) + 3] < 200 && out[(2 * 4) + 3] > 0);
}
