//! 共通モジュール

pub mod colors;
pub mod config;
pub mod constants;
pub mod error;
pub mod fractal;
pub mod gpu;
pub mod input;
pub mod render;
pub mod session;
pub mod viewer;
pub mod viewport;
