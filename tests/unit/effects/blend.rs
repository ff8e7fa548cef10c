use super::*;

#[test]
fn over_opaque_source_replaces_destination() {
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255], 1.0), [9, 8, 7, 255]);
    assert_eq!(over([1, 2, 3, 255], [9, 8, 7, 255], 0.0), [1, 2, 3, 255]);
    assert_eq!(over([255, 255, 255, 255], [0, 0, 0, 0], 1.0), [255, 255, 255, 255]);
}

#[test]
fn multiply_with_white_or_transparent_is_identity() {
    let dst = [100, 50, 25, 255];
    assert_eq!(multiply(dst, [255, 255, 255, 255]), dst);
    assert_eq!(multiply(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn multiply_with_opaque_black_is_black() {
    assert_eq!(multiply([100, 50, 25, 255], [0, 0, 0, 255]), [0, 0, 0, 255]);
}

#[test]
fn multiply_onto_transparent_keeps_source() {
    assert_eq!(multiply([0, 0, 0, 0], [60, 40, 20, 80]), [60, 40, 20, 80]);
}

#[test]
fn solid_tint_multiplies_every_pixel() {
    let mut buf = [255u8, 255, 255, 255].repeat(3);
    multiply_solid_in_place(&mut buf, [255, 204, 153, 255]);
    assert!(buf.chunks_exact(4).all(|px| px == [255, 204, 153, 255]));
}

#[test]
fn vignette_leaves_center_and_darkens_corners() {
    let (w, h) = (5u32, 5u32);
    let mut buf = [200u8, 200, 200, 255].repeat((w * h) as usize);
    vignette_in_place(&mut buf, w, h, 0.6);

    let at = |x: u32, y: u32| {
        let i = ((y * w + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    };
    assert_eq!(at(2, 2), [200, 200, 200, 255]);
    let corner = at(0, 0);
    assert!(corner[0] < 100, "{corner:?}");
    assert_eq!(corner[3], 255);
    assert!(at(1, 2)[0] > corner[0]);
}

#[test]
fn zero_vignette_is_noop() {
    let mut buf = [10u8, 20, 30, 255].repeat(4);
    let before = buf.clone();
    vignette_in_place(&mut buf, 2, 2, 0.0);
    assert_eq!(buf, before);
}
