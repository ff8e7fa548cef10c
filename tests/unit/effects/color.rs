use super::*;

fn run(px: [u8; 4], ops: &[ColorOp]) -> [u8; 4] {
    let mut buf = px.to_vec();
    apply_color_ops_in_place(&mut buf, ops);
    [buf[0], buf[1], buf[2], buf[3]]
}

#[test]
fn identity_parameters_produce_no_ops() {
    let p = EffectParameters::IDENTITY;
    assert!(pre_blur_ops(&p).is_empty());
    assert!(post_blur_ops(&p).is_empty());
}

#[test]
fn brightness_scales_straight_color() {
    assert_eq!(run([64, 32, 0, 255], &[ColorOp::brightness(2.0)]), [128, 64, 0, 255]);
    // Half-transparent pixels are scaled in straight space and re-premultiplied.
    assert_eq!(run([64, 0, 0, 128], &[ColorOp::brightness(2.0)]), [128, 0, 0, 128]);
}

#[test]
fn brightness_clamps_after_stage() {
    let out = run([200, 200, 200, 255], &[ColorOp::brightness(2.0), ColorOp::brightness(0.5)]);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn zero_contrast_is_mid_gray() {
    let out = run([10, 240, 90, 255], &[ColorOp::contrast(0.0)]);
    for c in &out[..3] {
        assert!((127..=128).contains(c), "{out:?}");
    }
}

#[test]
fn grayscale_and_desaturate_use_luma_weights() {
    assert_eq!(run([255, 0, 0, 255], &[ColorOp::grayscale(1.0)]), [54, 54, 54, 255]);
    assert_eq!(run([255, 0, 0, 255], &[ColorOp::saturate(0.0)]), [54, 54, 54, 255]);
}

#[test]
fn zero_hue_rotation_keeps_color() {
    let px = [200, 100, 50, 255];
    let out = run(px, &[ColorOp::hue_rotate(0.0)]);
    for i in 0..3 {
        assert!((i16::from(out[i]) - i16::from(px[i])).abs() <= 1, "{out:?}");
    }
}

#[test]
fn full_sepia_tints_gray_towards_warm() {
    let out = run([128, 128, 128, 255], &[ColorOp::sepia(1.0)]);
    assert!(out[0] > out[1] && out[1] > out[2], "{out:?}");
    assert_eq!(out[3], 255);
}

#[test]
fn transparent_pixels_are_untouched() {
    assert_eq!(run([0, 0, 0, 0], &[ColorOp::brightness(2.0)]), [0, 0, 0, 0]);
}

#[test]
fn half_turn_hue_rotation_matches_css_matrix() {
    assert_eq!(run([255, 0, 0, 255], &[ColorOp::hue_rotate(180.0)]), [0, 109, 109, 255]);
    // A full turn is the identity again.
    let px = [200, 100, 50, 255];
    let out = run(px, &[ColorOp::hue_rotate(180.0), ColorOp::hue_rotate(180.0)]);
    for i in 0..3 {
        assert!(out[i].abs_diff(px[i]) <= 2, "{out:?}");
    }
}

#[test]
fn quarter_turns_in_opposite_directions_differ() {
    let px = [200, 100, 50, 255];
    let cw = run(px, &[ColorOp::hue_rotate(90.0)]);
    let ccw = run(px, &[ColorOp::hue_rotate(-90.0)]);
    assert_ne!(cw, ccw);
}
