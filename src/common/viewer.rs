//! ウィンドウ表示のメインループ
//!
//! 描画処理（CPU / GPU）はクロージャとして受け取る。

use super::config::Options;
use super::constants::TARGET_FPS;
use super::error::ViewerError;
use super::input::InputLayer;
use super::render::save_png;
use super::session::{AnimationClock, ExplorerState, FrameParams};
use super::viewport::Resolution;
use log::{debug, error, info};
use minifb::{Window, WindowOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// 操作方法を表示
pub fn print_controls() {
    println!("操作方法:");
    println!("  - マウスホイール: 拡大/縮小");
    println!("  - 左クリック+ドラッグ: 移動（パン）");
    println!("  - 右クリック: クリック位置をジュリア集合のシードにする");
    println!("  - M / J キー: マンデルブロ / ジュリア に切替");
    println!("  - R キー: 初期表示にリセット");
    println!("  - S キー: 現在の表示を画像として保存");
    println!("  - Q / Escape キー: 終了");
    println!();
}

/// 1フレームだけ描画して保存する（ウィンドウなし）
pub fn render_to_file<F>(
    state: &ExplorerState,
    resolution: Resolution,
    time: f64,
    path: &Path,
    mut render: F,
) -> Result<(), ViewerError>
where
    F: FnMut(&FrameParams) -> Result<Vec<u32>, ViewerError>,
{
    let start = Instant::now();
    let buffer = render(&state.snapshot(time))?;
    save_png(&buffer, resolution, path)?;
    info!(
        "画像を保存しました: {} ({:.2?})",
        path.display(),
        start.elapsed()
    );
    Ok(())
}

/// ビューア本体
pub struct Viewer {
    window: Window,
    state: ExplorerState,
    resolution: Resolution,
    clock: AnimationClock,
    input: InputLayer,
    buffer: Vec<u32>,
    save_counter: u32,
    label: &'static str,
}

impl Viewer {
    /// `label` はウィンドウタイトルに表示する計算方式 ("CPU" / "GPU")
    pub fn new(options: &Options, label: &'static str) -> Result<Self, ViewerError> {
        let resolution = options.resolution()?;
        let mut window = Window::new(
            "フラクタルエクスプローラ",
            resolution.width,
            resolution.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(TARGET_FPS);

        Ok(Self {
            window,
            state: options.initial_state(),
            resolution,
            clock: options.clock(),
            input: InputLayer::default(),
            buffer: vec![0; resolution.len()],
            save_counter: 0,
            label,
        })
    }

    fn title(&self) -> String {
        format!(
            "{} [{}] x{:.2e} iter {}",
            self.state.mode,
            self.label,
            self.state.viewport.magnification(),
            self.state.budget.get()
        )
    }

    fn save_image(&mut self) -> Result<PathBuf, ViewerError> {
        self.save_counter += 1;
        let path = PathBuf::from(format!("fractal_{:03}.png", self.save_counter));
        save_png(&self.buffer, self.resolution, &path)?;
        Ok(path)
    }

    /// ウィンドウが閉じられるまで入力処理と描画を繰り返す
    ///
    /// パレットが時間で動くので、時計が止まっていない限り毎フレーム描画する。
    pub fn run<F>(mut self, mut render: F) -> Result<(), ViewerError>
    where
        F: FnMut(&FrameParams) -> Result<Vec<u32>, ViewerError>,
    {
        let start = Instant::now();
        self.buffer = render(&self.state.snapshot(self.clock.seconds()))?;
        self.window.set_title(&self.title());
        info!("初期描画完了: {:.2?} [{}]", start.elapsed(), self.label);

        loop {
            let events = self
                .input
                .poll(&self.window, &mut self.state, self.resolution);
            if events.quit_requested {
                break;
            }

            if events.changed || !self.clock.is_frozen() {
                let start = Instant::now();
                let frame = self.state.snapshot(self.clock.seconds());
                self.buffer = render(&frame)?;

                if events.changed {
                    self.window.set_title(&self.title());
                    info!(
                        "再描画: {:.2?} | {} | 中心: ({:.6}, {:.6}i) | ズーム: x{:.2e} | 反復: {}",
                        start.elapsed(),
                        frame.mode,
                        frame.viewport.center.re,
                        frame.viewport.center.im,
                        frame.viewport.magnification(),
                        frame.budget.get()
                    );
                } else {
                    debug!("フレーム: {:.2?}", start.elapsed());
                }
            }

            if events.save_requested {
                match self.save_image() {
                    Ok(path) => info!("画像を保存しました: {}", path.display()),
                    Err(e) => error!("{}", e),
                }
            }

            self.window
                .update_with_buffer(&self.buffer, self.resolution.width, self.resolution.height)?;
        }

        info!("終了しました");
        Ok(())
    }
}
