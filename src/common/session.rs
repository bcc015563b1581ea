//! ビューアの状態と入力操作
//!
//! 入力層から届く離散的な操作（パン・ズーム・シード選択・モード切替・
//! リセット）で `ExplorerState` を更新し、フレームごとに不変の
//! スナップショット `FrameParams` を切り出して描画側に値渡しする。
//! 1フレームの全ピクセルは同じスナップショットを参照する。

use super::constants::DEFAULT_JULIA_SEED;
use super::fractal::{color_at, FractalMode, IterationBudget};
use super::viewport::{Resolution, Viewport};
use num_complex::Complex;
use std::time::Instant;

/// 入力操作で書き換えられる状態
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplorerState {
    pub viewport: Viewport,
    pub mode: FractalMode,
    /// モードを切り替えても保持される
    pub julia_seed: Complex<f64>,
    pub budget: IterationBudget,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            mode: FractalMode::default(),
            julia_seed: Complex::new(DEFAULT_JULIA_SEED.0, DEFAULT_JULIA_SEED.1),
            budget: IterationBudget::default(),
        }
    }
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ドラッグによる移動
    pub fn on_pan_delta(&mut self, dx: f64, dy: f64, resolution: Resolution) {
        self.viewport.pan(dx, dy, resolution);
    }

    /// ホイールによるズーム。反復回数もズーム深度に合わせて導出し直す。
    pub fn on_zoom_delta(&mut self, wheel_delta_y: f64) {
        self.viewport.zoom_by_wheel(wheel_delta_y);
        self.budget = IterationBudget::from_zoom(self.viewport.zoom);
    }

    /// クリック位置をジュリア集合のシードにする（モードは変えない）
    ///
    /// クリック位置は画面座標のまま変換する（y 軸は反転しない）。
    pub fn on_seed_pick(&mut self, pixel_x: f64, pixel_y: f64, resolution: Resolution) {
        self.julia_seed = self.viewport.pixel_to_plane(pixel_x, pixel_y, resolution);
    }

    pub fn on_mode_set(&mut self, mode: FractalMode) {
        self.mode = mode;
    }

    /// 初期表示に戻す
    pub fn on_reset(&mut self) {
        *self = Self::default();
    }

    /// 現在の状態と時刻から1フレーム分のパラメータを切り出す
    pub fn snapshot(&self, time: f64) -> FrameParams {
        FrameParams {
            viewport: self.viewport,
            mode: self.mode,
            julia_seed: self.julia_seed,
            budget: self.budget,
            time,
        }
    }
}

/// 1フレームの描画に必要な入力のすべて
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub viewport: Viewport,
    pub mode: FractalMode,
    pub julia_seed: Complex<f64>,
    pub budget: IterationBudget,
    pub time: f64,
}

impl FrameParams {
    /// フラグメント座標（左下原点・y 上向き）の色
    #[inline]
    pub fn color_at_pixel(&self, x: f64, y: f64, resolution: Resolution) -> [u8; 3] {
        let point = self.viewport.pixel_to_plane(x, y, resolution);
        color_at(point, self.mode, self.julia_seed, self.budget, self.time)
    }
}

/// 起動からの経過秒数
///
/// `frozen` の場合は常に 0 を返し、パレットが動かない。
#[derive(Clone, Copy, Debug)]
pub struct AnimationClock {
    start: Instant,
    frozen: bool,
}

impl AnimationClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            frozen: false,
        }
    }

    pub fn frozen() -> Self {
        Self {
            start: Instant::now(),
            frozen: true,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn seconds(&self) -> f64 {
        if self.frozen {
            0.0
        } else {
            self.start.elapsed().as_secs_f64()
        }
    }
}
