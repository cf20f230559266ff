//! 统一错误处理模块
//!
//! 特效层自身从不向上传播错误：池耗尽、无池帧都是正常路径。
//! 只有存档读写会失败，错误类型集中定义在这里。

use thiserror::Error;

/// 特效系统错误类型
#[derive(Error, Debug)]
pub enum SfxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Invalid sfx count in save stream: {0}")]
    InvalidCount(i32),

    #[error("Sfx count {count} exceeds pool capacity {capacity}")]
    CountExceedsCapacity { count: usize, capacity: usize },

    #[error("Unknown sfx type: {0}")]
    UnknownType(i32),

    #[error("Unknown frame: {0}")]
    UnknownFrame(usize),
}

/// 特效结果类型别名
pub type SfxResult<T> = Result<T, SfxError>;
