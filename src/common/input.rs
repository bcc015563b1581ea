//! minifb の入力を状態更新に変換する入力層
//!
//! 操作方法:
//!   - マウスホイール: 拡大/縮小
//!   - 左クリック+ドラッグ: 移動（パン）
//!   - 右クリック: クリック位置をジュリア集合のシードにする
//!   - M / J キー: マンデルブロ / ジュリア に切替
//!   - R キー: 初期表示にリセット
//!   - S キー: 現在の表示を画像として保存
//!   - Q / Escape キー: 終了

use super::fractal::FractalMode;
use super::session::ExplorerState;
use super::viewport::Resolution;
use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

/// ホイール1目盛りあたりの移動量（ブラウザの deltaY 相当）
pub const WHEEL_PIXELS_PER_LINE: f64 = 100.0;

/// minifb のスクロール量 (上が正) をズーム用のホイール量 (上が負) に変換
#[inline]
pub fn wheel_delta(scroll_y: f32) -> f64 {
    -(scroll_y as f64) * WHEEL_PIXELS_PER_LINE
}

/// 左ボタンのドラッグ量を前回位置との差分として積算する
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    last: Option<(f32, f32)>,
}

impl DragTracker {
    /// ボタンが押されている間、前回からの移動量を返す
    pub fn update(&mut self, position: Option<(f32, f32)>, pressed: bool) -> Option<(f64, f64)> {
        let delta = match (pressed, self.last, position) {
            (true, Some((lx, ly)), Some((x, y))) if (x, y) != (lx, ly) => {
                Some(((x - lx) as f64, (y - ly) as f64))
            }
            _ => None,
        };
        self.last = if pressed { position } else { None };
        delta
    }
}

/// 1フレーム分の入力処理の結果
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputEvents {
    /// 状態が変わった（再描画が必要）
    pub changed: bool,
    pub save_requested: bool,
    pub quit_requested: bool,
}

/// ウィンドウの入力を読み取り、状態を更新する
#[derive(Debug, Default)]
pub struct InputLayer {
    drag: DragTracker,
    right_was_down: bool,
}

impl InputLayer {
    pub fn poll(
        &mut self,
        window: &Window,
        state: &mut ExplorerState,
        resolution: Resolution,
    ) -> InputEvents {
        let mut events = InputEvents {
            quit_requested: !window.is_open()
                || window.is_key_down(Key::Escape)
                || window.is_key_down(Key::Q),
            ..InputEvents::default()
        };

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            state.on_reset();
            info!("リセット");
            events.changed = true;
        }

        if window.is_key_pressed(Key::M, KeyRepeat::No) && state.mode != FractalMode::Mandelbrot {
            state.on_mode_set(FractalMode::Mandelbrot);
            info!("モード切替: {}", state.mode);
            events.changed = true;
        }

        if window.is_key_pressed(Key::J, KeyRepeat::No) && state.mode != FractalMode::Julia {
            state.on_mode_set(FractalMode::Julia);
            info!("モード切替: {}", state.mode);
            events.changed = true;
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            events.save_requested = true;
        }

        let position = window.get_mouse_pos(MouseMode::Discard);

        if let Some((_, scroll_y)) = window.get_scroll_wheel() {
            if scroll_y != 0.0 {
                state.on_zoom_delta(wheel_delta(scroll_y));
                events.changed = true;
            }
        }

        let left_down = window.get_mouse_down(MouseButton::Left);
        if let Some((dx, dy)) = self.drag.update(position, left_down) {
            state.on_pan_delta(dx, dy, resolution);
            events.changed = true;
        }

        // 右クリックは押した瞬間のみ
        let right_down = window.get_mouse_down(MouseButton::Right);
        if right_down && !self.right_was_down {
            if let Some((mx, my)) = position {
                state.on_seed_pick(mx as f64, my as f64, resolution);
                info!(
                    "シード: ({:.6}, {:.6}i)",
                    state.julia_seed.re, state.julia_seed.im
                );
                events.changed = true;
            }
        }
        self.right_was_down = right_down;

        events
    }
}
