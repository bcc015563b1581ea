//! マンデルブロ集合・ジュリア集合エクスプローラ
//!
//! 脱出時間カーネルとビューポート変換をライブラリとして提供し、
//! CPU版 (`fractal-explorer`) と GPU版 (`fractal-explorer-gpu`) の
//! 両バイナリから共通で利用する。

pub mod common;
