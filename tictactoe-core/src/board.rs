//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::CELL_COUNT;
use crate::error::GameError;
use crate::player::{Player, Position};

/// 棋盘
///
/// 3x3 格子，行优先存储，索引为 row * 3 + col。
/// 9 个格子直接内联存储，棋盘整体为值语义（`Copy`），
/// 搜索时每层使用独立副本即可，不需要落子/撤销配对操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Player>; CELL_COUNT],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// 获取指定位置的标记
    pub fn get(&self, pos: Position) -> Option<Player> {
        if pos.is_valid() {
            self.cells[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的标记（不检查占用，内部和搜索用）
    pub fn set(&mut self, pos: Position, mark: Option<Player>) {
        if pos.is_valid() {
            self.cells[pos.to_index()] = mark;
        }
    }

    /// 检查棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// 列举所有空格子（行优先顺序）
    ///
    /// 顺序有意义：搜索的同分走法按此顺序取第一个。
    pub fn available_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .filter_map(|(index, _)| Position::from_index(index))
            .collect()
    }

    /// 落子，返回落子后的新棋盘
    ///
    /// 校验先于写入：位置越界或格子被占时返回错误，原棋盘不变。
    pub fn place(&self, pos: Position, player: Player) -> crate::Result<Board> {
        if !pos.is_valid() {
            return Err(GameError::InvalidPosition {
                row: pos.row,
                col: pos.col,
            });
        }
        if self.cells[pos.to_index()].is_some() {
            return Err(GameError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        let mut next = *self;
        next.cells[pos.to_index()] = Some(player);
        Ok(next)
    }

    /// 从标记数组构建棋盘（测试和局面设置用）
    pub fn from_cells(cells: [Option<Player>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// 获取全部格子（行优先）
    pub fn cells(&self) -> &[Option<Player>; CELL_COUNT] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3u8 {
            for col in 0..3u8 {
                let c = match self.get(Position::new_unchecked(row, col)) {
                    Some(player) => player.display_char(),
                    None => '.',
                };
                write!(f, "{c}")?;
                if col < 2 {
                    write!(f, " ")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
