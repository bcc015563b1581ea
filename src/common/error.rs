//! ビューア全体のエラー型
//!
//! 脱出時間カーネルとビューポート変換はエラーを返さない。
//! ここで扱うのはウィンドウ・GPU・画像保存など外側の失敗のみ。

/// ビューアのエラー
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("解像度が不正です: {width}x{height}")]
    InvalidResolution { width: usize, height: usize },
    #[error("ウィンドウの操作に失敗しました: {0}")]
    Window(#[from] minifb::Error),
    #[error("画像の保存に失敗しました: {0}")]
    Image(#[from] image::ImageError),
    /// フレームバッファの長さが解像度と一致しない
    #[error("フレームバッファの大きさが不正です: {actual} ピクセル (期待値 {expected})")]
    BufferSize { expected: usize, actual: usize },
    #[error("GPU アダプタが見つかりません")]
    NoAdapter,
    #[error("GPU デバイスの取得に失敗しました: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("GPU バッファの読み出しに失敗しました: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
    /// 読み出し完了の通知が届かなかった
    #[error("GPU からの読み出し通知が失われました")]
    ReadbackLost,
}
