//! 脱出時間カーネル
//!
//! `(座標, モード, シード, 反復回数, 時刻) -> 色` の純粋関数として実装し、
//! ピクセル間で状態を共有しないので任意の並列度で呼び出せる。

use super::colors::{cosine_palette, drift, to_rgb8, INTERIOR};
use super::constants::{
    DEFAULT_ITERATIONS, DEPTH_REFERENCE_ZOOM, ESCAPE_RADIUS_SQR, HARD_MAX_ITER, ITER_BASE,
    ITER_PER_DEPTH, SOFT_MAX_ITER,
};
use num_complex::Complex;
use std::f64::consts::LN_2;

/// 描画するフラクタルの種類
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FractalMode {
    /// 座標を定数 c とし、z0 = 0 から反復
    #[default]
    Mandelbrot,
    /// シードを定数 c とし、座標を z0 として反復
    Julia,
}

impl std::fmt::Display for FractalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FractalMode::Mandelbrot => write!(f, "Mandelbrot"),
            FractalMode::Julia => write!(f, "Julia"),
        }
    }
}

/// 反復回数。常に `[1, HARD_MAX_ITER]` に収まる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IterationBudget(u32);

impl IterationBudget {
    /// 任意の値を `[1, HARD_MAX_ITER]` に丸め込む
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(1, HARD_MAX_ITER as i64) as u32)
    }

    /// ズーム深度から反復回数を導出する
    ///
    /// `depth = max(1, log2(3 / zoom + 1))`, `round(150 + depth * 80)` を
    /// `SOFT_MAX_ITER` で頭打ちにする。
    pub fn from_zoom(zoom: f64) -> Self {
        let depth = (DEPTH_REFERENCE_ZOOM / zoom + 1.0).log2().max(1.0);
        let iterations = (ITER_BASE + depth * ITER_PER_DEPTH)
            .round()
            .min(SOFT_MAX_ITER as f64);
        Self::new(iterations as i64)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self(DEFAULT_ITERATIONS)
    }
}

/// 1点の反復結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeTime {
    /// 脱出した反復番号。脱出しなかった場合は `budget` と等しい。
    pub iteration: u32,
    pub budget: u32,
    /// 最後の z の |z|²
    pub norm_sqr: f64,
}

impl EscapeTime {
    #[inline]
    pub fn escaped(&self) -> bool {
        self.iteration < self.budget
    }

    /// スムーズカラーリング用の正規化された連続反復回数
    ///
    /// `(i + 1 - nu) / budget`, `nu = ln(ln|z| / ln2) / ln2`
    pub fn smooth(&self) -> f64 {
        let log_zn = 0.5 * self.norm_sqr.ln();
        let nu = (log_zn / LN_2).ln() / LN_2;
        (self.iteration as f64 + 1.0 - nu) / self.budget as f64
    }
}

/// z ← z² + c を反復して脱出時刻を求める
///
/// ループは常に `HARD_MAX_ITER` 回で打ち切られ、`budget` に達するか
/// |z|² > 16 になった時点で抜ける。
pub fn escape_time(
    point: Complex<f64>,
    mode: FractalMode,
    seed: Complex<f64>,
    budget: IterationBudget,
) -> EscapeTime {
    let (mut z, c) = match mode {
        FractalMode::Mandelbrot => (Complex::new(0.0, 0.0), point),
        FractalMode::Julia => (point, seed),
    };
    let budget = budget.get().min(HARD_MAX_ITER);

    for i in 0..HARD_MAX_ITER {
        if i >= budget {
            break;
        }
        z = Complex::new(z.re * z.re - z.im * z.im, 2.0 * z.re * z.im) + c;
        let norm_sqr = z.norm_sqr();
        if norm_sqr > ESCAPE_RADIUS_SQR {
            return EscapeTime {
                iteration: i,
                budget,
                norm_sqr,
            };
        }
    }

    EscapeTime {
        iteration: budget,
        budget,
        norm_sqr: z.norm_sqr(),
    }
}

/// 1点の色を計算
///
/// 脱出しなかった点は黒。脱出した点はスムーズカラーリングの値に
/// 時間によるパレットの揺らぎを加えてコサインパレットで着色する。
pub fn color_at(
    point: Complex<f64>,
    mode: FractalMode,
    seed: Complex<f64>,
    budget: IterationBudget,
    time: f64,
) -> [u8; 3] {
    let escape = escape_time(point, mode, seed, budget);
    if !escape.escaped() {
        return INTERIOR;
    }
    let t = drift(escape.smooth(), time);
    to_rgb8(cosine_palette(t))
}
