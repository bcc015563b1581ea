//! 脱出時間カーネルとビューポート変換の性質テスト
//!
//! 1. 主カージオイド・周期2バルブの内部は脱出しない
//! 2. 反復回数を増やしても脱出済みの点の脱出番号は変わらない
//! 3. 反復回数は [1, 2000] に丸められる
//! 4. pixel_to_plane と plane_to_pixel は互いに逆変換
//! 5. ホイールズームは指数部で加法的に合成される

use fractal_explorer::common::{
    constants::HARD_MAX_ITER,
    fractal::{color_at, escape_time, FractalMode, IterationBudget},
    viewport::{Resolution, Viewport},
};
use num_complex::Complex;
use proptest::prelude::*;

const ORIGIN: Complex<f64> = Complex::new(0.0, 0.0);

// ── Helpers ─────────────────────────────────────────────────────────────

/// 主カージオイド内部: c = μ/2 − μ²/4, |μ| < 1
fn cardioid_point() -> impl Strategy<Value = Complex<f64>> {
    (0.0f64..0.95, 0.0f64..std::f64::consts::TAU).prop_map(|(r, theta)| {
        let mu = Complex::from_polar(r, theta);
        mu / 2.0 - mu * mu / 4.0
    })
}

/// 周期2バルブ内部: |c + 1| < 1/4
fn period2_bulb_point() -> impl Strategy<Value = Complex<f64>> {
    (0.0f64..0.24, 0.0f64..std::f64::consts::TAU)
        .prop_map(|(r, theta)| Complex::new(-1.0, 0.0) + Complex::from_polar(r, theta))
}

fn plane_point() -> impl Strategy<Value = Complex<f64>> {
    (-2.5f64..1.5, -1.5f64..1.5).prop_map(|(re, im)| Complex::new(re, im))
}

fn resolution() -> impl Strategy<Value = Resolution> {
    (1usize..4000, 1usize..4000).prop_map(|(w, h)| Resolution::new(w, h).unwrap())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. 内部の点は脱出しない
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn main_cardioid_never_escapes(c in cardioid_point(), budget in 1i64..=2000) {
        let e = escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(budget));
        prop_assert!(!e.escaped(), "c={:?} escaped at {}", c, e.iteration);
        prop_assert_eq!(e.iteration as i64, budget);
    }

    #[test]
    fn period2_bulb_never_escapes(c in period2_bulb_point(), budget in 1i64..=2000) {
        let e = escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(budget));
        prop_assert!(!e.escaped(), "c={:?} escaped at {}", c, e.iteration);
        prop_assert_eq!(e.iteration as i64, budget);
    }

    #[test]
    fn interior_points_are_black(c in cardioid_point(), time in -100.0f64..100.0) {
        prop_assert_eq!(
            color_at(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::default(), time),
            [0, 0, 0]
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. 脱出番号は反復回数に依存しない
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn raising_budget_keeps_escape_iteration(
        c in plane_point(),
        small in 1i64..500,
        extra in 0i64..1500,
        julia in any::<bool>(),
    ) {
        let mode = if julia { FractalMode::Julia } else { FractalMode::Mandelbrot };
        let seed = Complex::new(-0.8, 0.156);
        let low = escape_time(c, mode, seed, IterationBudget::new(small));
        let high = escape_time(c, mode, seed, IterationBudget::new(small + extra));
        if low.escaped() {
            prop_assert_eq!(low.iteration, high.iteration);
            prop_assert_eq!(low.norm_sqr, high.norm_sqr);
        } else {
            prop_assert!(high.iteration >= low.iteration);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. 反復回数の丸め込み
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn budget_always_within_hard_cap(requested in any::<i64>()) {
        let budget = IterationBudget::new(requested).get();
        prop_assert!((1..=HARD_MAX_ITER).contains(&budget));
    }

    #[test]
    fn non_positive_budget_behaves_like_one(c in plane_point(), requested in i64::MIN..=0) {
        prop_assert_eq!(
            escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(requested)),
            escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(1))
        );
    }

    #[test]
    fn oversized_budget_behaves_like_hard_cap(c in plane_point(), requested in 2000i64..10_000_000) {
        prop_assert_eq!(
            escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(requested)),
            escape_time(c, FractalMode::Mandelbrot, ORIGIN, IterationBudget::new(2000))
        );
    }

    #[test]
    fn zoom_derived_budget_stays_under_soft_cap(zoom in 1e-300f64..1e300) {
        let budget = IterationBudget::from_zoom(zoom).get();
        prop_assert!((230..=1500).contains(&budget), "zoom={} budget={}", zoom, budget);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. ビューポート変換の往復
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn viewport_round_trip(
        res in resolution(),
        cx in -2.0f64..2.0,
        cy in -2.0f64..2.0,
        zoom in 1e-6f64..10.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let vp = Viewport::new(Complex::new(cx, cy), zoom);
        let x = fx * res.width as f64;
        let y = fy * res.height as f64;
        let (rx, ry) = vp.plane_to_pixel(vp.pixel_to_plane(x, y, res), res);
        prop_assert!((rx - x).abs() < 1e-3, "x: {} -> {}", x, rx);
        prop_assert!((ry - y).abs() < 1e-3, "y: {} -> {}", y, ry);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. ズームの合成
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wheel_zoom_composes_additively(d1 in -5000.0f64..5000.0, d2 in -5000.0f64..5000.0) {
        let mut twice = Viewport::default();
        twice.zoom_by_wheel(d1);
        twice.zoom_by_wheel(d2);

        let mut once = Viewport::default();
        once.zoom_by_wheel(d1 + d2);

        prop_assert!(twice.zoom > 0.0);
        prop_assert!(((twice.zoom - once.zoom) / once.zoom).abs() < 1e-12);
    }
}
