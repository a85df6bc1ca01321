//! 井字棋核心规则库
//!
//! 包含:
//! - 玩家、位置、棋盘等核心数据结构
//! - 落子校验与胜负判定
//! - 错误类型定义

mod board;
mod constants;
mod error;
mod player;
mod rules;

pub use board::Board;
pub use constants::{BOARD_SIZE, CELL_COUNT, WIN_LINES};
pub use error::{GameError, Result};
pub use player::{Player, Position};
pub use rules::{GameStatus, Rules};
