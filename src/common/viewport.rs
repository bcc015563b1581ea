//! ビューポート変換
//!
//! 画面上のピクセル座標と複素平面上の座標を相互に変換する。
//! 縦横どちらの軸も画面の**高さ**で正規化するため、アスペクト比は
//! 常に保たれる（横方向を幅で独立に正規化することはしない）。
//!
//! 同じ変換を描画とシード選択の両方で使う。

use super::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_RATE};
use super::error::ViewerError;
use num_complex::Complex;

/// 描画解像度（ピクセル単位）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    /// 幅・高さのどちらかが 0 ならエラー
    pub fn new(width: usize, height: usize) -> Result<Self, ViewerError> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    /// フレームバッファの総ピクセル数
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 表示中の領域: 中心座標と、画面の高さに相当する複素平面上の幅
///
/// ホイール操作後の `zoom` は常に `[MIN_ZOOM, MAX_ZOOM]` に収まる。
/// 極端な拡大で f64 の仮数部を超える桁は失われる（既知の制限）。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Complex<f64>,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Complex::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    pub fn new(center: Complex<f64>, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// 1ピクセルあたりの複素平面上の長さ
    #[inline]
    pub fn pixel_scale(&self, resolution: Resolution) -> f64 {
        self.zoom / resolution.height as f64
    }

    /// ピクセル座標を複素平面上の座標に変換
    ///
    /// `uv = (pixel - 0.5 * resolution) / height`, `plane = center + uv * zoom`
    #[inline]
    pub fn pixel_to_plane(&self, x: f64, y: f64, resolution: Resolution) -> Complex<f64> {
        let width = resolution.width as f64;
        let height = resolution.height as f64;
        let uv = Complex::new((x - 0.5 * width) / height, (y - 0.5 * height) / height);
        self.center + uv * self.zoom
    }

    /// `pixel_to_plane` の逆変換
    pub fn plane_to_pixel(&self, point: Complex<f64>, resolution: Resolution) -> (f64, f64) {
        let width = resolution.width as f64;
        let height = resolution.height as f64;
        let uv = (point - self.center) / self.zoom;
        (uv.re * height + 0.5 * width, uv.im * height + 0.5 * height)
    }

    /// ドラッグ量 (dx, dy) だけ表示をずらす
    ///
    /// 画面の下方向は平面の y 増加方向に対応させ、内容がカーソルと一緒に動く。
    pub fn pan(&mut self, dx: f64, dy: f64, resolution: Resolution) {
        let scale = self.pixel_scale(resolution);
        self.center.re -= dx * scale;
        self.center.im += dy * scale;
    }

    /// ホイール量 `delta` に応じて指数的にズームする
    ///
    /// 正の値で縮小（表示範囲が広がる）、負の値で拡大。
    /// 結果は `[MIN_ZOOM, MAX_ZOOM]` に丸められ、0・無限大・NaN にはならない。
    pub fn zoom_by_wheel(&mut self, delta: f64) {
        if delta.is_nan() {
            return;
        }
        self.zoom = (self.zoom * (delta * WHEEL_ZOOM_RATE).exp()).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// 初期表示に対する拡大倍率
    pub fn magnification(&self) -> f64 {
        DEFAULT_ZOOM / self.zoom
    }
}
