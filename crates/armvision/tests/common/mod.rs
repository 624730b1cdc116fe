#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const ORANGE: Rgb<u8> = Rgb([160, 140, 70]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

pub const PATTERN_W: u32 = 12;
pub const PATTERN_H: u32 = 8;

/// Hollow rectangle with a vertical bar, used as the target pattern.
pub fn pattern(x: u32, y: u32) -> bool {
    x < 2 || y < 2 || x >= PATTERN_W - 2 || y >= PATTERN_H - 2 || x == 5
}

/// 10x10 block covering `center - 5 .. center + 5`.
pub fn block(img: &mut RgbImage, center: (u32, u32), color: Rgb<u8>) {
    for y in center.1 - 5..center.1 + 5 {
        for x in center.0 - 5..center.0 + 5 {
            img.put_pixel(x, y, color);
        }
    }
}

pub fn stamp_pattern(img: &mut RgbImage, at: (u32, u32), color: Rgb<u8>) {
    for y in 0..PATTERN_H {
        for x in 0..PATTERN_W {
            if pattern(x, y) {
                img.put_pixel(at.0 + x, at.1 + y, color);
            }
        }
    }
}

/// 100x100 frame: yellow (20,20), blue (20,70), green (60,70), red (60,20)
/// and the orange target pattern with its corner at (30,40).
pub fn arm_scene() -> RgbImage {
    let mut img = RgbImage::new(100, 100);
    block(&mut img, (20, 20), YELLOW);
    block(&mut img, (20, 70), BLUE);
    block(&mut img, (60, 70), GREEN);
    block(&mut img, (60, 20), RED);
    stamp_pattern(&mut img, (30, 40), ORANGE);
    img
}

/// Joint vector expected for [`arm_scene`].
pub const ARM_SCENE_JOINTS: [f64; 8] = [0.0, -2.0, -1.6, -2.0, -1.6, 0.0, 0.76, 0.76];

pub fn reference_image() -> RgbImage {
    let mut img = RgbImage::new(PATTERN_W, PATTERN_H);
    stamp_pattern(&mut img, (0, 0), WHITE);
    img
}

pub fn write_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write png");
    path
}

pub fn assert_vec_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        approx::assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
    }
}
