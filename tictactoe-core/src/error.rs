//! 错误类型定义

use thiserror::Error;

/// 游戏规则错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// 位置超出棋盘范围
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: u8, col: u8 },

    /// 目标格子已被占用
    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 游戏尚未开始
    #[error("Game has not started")]
    GameNotStarted,

    /// 游戏进行中不允许修改模式或执子方
    #[error("Game is already in progress")]
    GameAlreadyStarted,
}

/// 游戏操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
