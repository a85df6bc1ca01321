//! 胜负判定规则

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::WIN_LINES;
use crate::player::Player;

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 一方获胜
    Win(Player),
    /// 平局
    Draw,
}

impl GameStatus {
    /// 对局是否已结束（获胜或平局）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// 规则判定器
pub struct Rules;

impl Rules {
    /// 判定获胜方
    ///
    /// 仅检查 8 条固定获胜线（3 行、3 列、2 条对角线）。
    /// 交替落子保证同一时刻至多一方占满获胜线。
    pub fn winner(board: &Board) -> Option<Player> {
        let cells = board.cells();
        for line in &WIN_LINES {
            if let Some(player) = cells[line[0]] {
                if cells[line[1]] == Some(player) && cells[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// 判定是否平局
    ///
    /// 棋盘已满且无获胜方。满盘带胜者是获胜而非平局，
    /// 调用方须先检查 `winner`（或直接使用 `status`）。
    pub fn is_draw(board: &Board) -> bool {
        board.is_full() && Self::winner(board).is_none()
    }

    /// 判定对局状态（先胜负后平局）
    pub fn status(board: &Board) -> GameStatus {
        if let Some(player) = Self::winner(board) {
            GameStatus::Win(player)
        } else if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}
