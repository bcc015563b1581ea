//! 共通定数

/// 描画領域の既定の幅
pub const VIEW_WIDTH: usize = 800;
/// 描画領域の既定の高さ
pub const VIEW_HEIGHT: usize = 600;

/// 反復回数の絶対上限（1ピクセルあたりの最悪計算量を抑える）
pub const HARD_MAX_ITER: u32 = 2000;

/// ズーム深度から導出する反復回数の上限
pub const SOFT_MAX_ITER: u32 = 1500;

/// 脱出判定半径の2乗（半径4）
pub const ESCAPE_RADIUS_SQR: f64 = 16.0;

/// 初期表示の中心座標 (実部, 虚部)
pub const DEFAULT_CENTER: (f64, f64) = (-0.5, 0.0);

/// 初期表示のズーム（画面の高さに相当する複素平面上の幅）
pub const DEFAULT_ZOOM: f64 = 3.0;

/// 初期の反復回数
pub const DEFAULT_ITERATIONS: u32 = 300;

/// ジュリア集合の初期シード
pub const DEFAULT_JULIA_SEED: (f64, f64) = (-0.8, 0.156);

/// マウスホイール1単位あたりのズーム指数
pub const WHEEL_ZOOM_RATE: f64 = 0.001;

/// ズームの下限・上限（f64 のアンダーフロー・オーバーフローを避ける）
pub const MIN_ZOOM: f64 = 1e-300;
pub const MAX_ZOOM: f64 = 1e300;

/// 反復回数の導出式: round(ITER_BASE + depth * ITER_PER_DEPTH)
pub const ITER_BASE: f64 = 150.0;
pub const ITER_PER_DEPTH: f64 = 80.0;

/// ズーム深度の基準値（初期ズームと同じ）
pub const DEPTH_REFERENCE_ZOOM: f64 = 3.0;

/// コサインパレットのチャンネル別位相 (R, G, B)
pub const PALETTE_PHASE: [f64; 3] = [0.0, 0.15, 0.33];

/// パレットの時間変化の振幅
pub const PALETTE_DRIFT_AMPLITUDE: f64 = 0.05;

/// パレットの時間変化の角速度 (rad/s)
pub const PALETTE_DRIFT_RATE: f64 = 0.1;

/// ウィンドウの目標フレームレート
pub const TARGET_FPS: usize = 60;
