//! カラーパレットと色変換関数

use super::constants::{PALETTE_DRIFT_AMPLITUDE, PALETTE_DRIFT_RATE, PALETTE_PHASE};
use std::f64::consts::TAU;

/// 内部点の色
pub const INTERIOR: [u8; 3] = [0, 0, 0];

/// GLSL の `fract` と同じく常に [0, 1) を返す（負数でも床関数基準）
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// 時間経過によるパレット位相のずれを加える
#[inline]
pub fn drift(t: f64, time: f64) -> f64 {
    fract(t + PALETTE_DRIFT_AMPLITUDE * (time * PALETTE_DRIFT_RATE).sin())
}

/// コサインパレット: 0.5 + 0.5 * cos(2π(t + 位相))
///
/// 各チャンネルは [0, 1] の範囲
pub fn cosine_palette(t: f64) -> [f64; 3] {
    PALETTE_PHASE.map(|phase| 0.5 + 0.5 * (TAU * (t + phase)).cos())
}

/// [0, 1] の色成分を 8bit に変換
pub fn to_rgb8(color: [f64; 3]) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// RGB を u32形式 (0xRRGGBB) に詰める
#[inline]
pub fn rgb_to_u32([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// u32形式 (0xRRGGBB) を RGB に分解
#[inline]
pub fn u32_to_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}
