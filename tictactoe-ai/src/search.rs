//! 搜索引擎
//!
//! 实现完全展开的 Minimax 搜索：无剪枝、无置换表、无随机性。
//! 3x3 棋盘的博弈树上界为 9! 条叶路径，完全展开代价可接受，
//! 且保证返回的走法在双方最优对抗下是可证最优的。

use serde::{Deserialize, Serialize};

use tictactoe_core::{Board, Player, Position, Rules};

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 最佳走法
    pub best_move: Position,
    /// 根节点评分（以被优化方视角计）
    pub score: i32,
    /// 本次搜索访问的节点数
    pub nodes_searched: u64,
}

/// AI 引擎
pub struct AiEngine {
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new() -> Self {
        Self { nodes_searched: 0 }
    }

    /// 搜索最佳走法
    ///
    /// 终局或满盘时返回 None（调用方应先检查对局状态）。
    pub fn best_move(&mut self, board: &Board, mover: Player) -> Option<Position> {
        self.analyze(board, mover).map(|result| result.best_move)
    }

    /// 搜索最佳走法并返回评分与节点统计
    ///
    /// 评分策略（depth 为自本次调用起的层数，首层候选的子节点为 0）：
    /// - 被优化方连成线：`10 - depth`，越快的必胜分越高
    /// - 对方连成线：`-10 + depth`，越慢的必败分越高
    /// - 满盘无线：`0`
    ///
    /// 同分走法取行优先枚举顺序中的第一个，结果完全确定。
    pub fn analyze(&mut self, board: &Board, mover: Player) -> Option<SearchResult> {
        self.nodes_searched = 0;

        if Rules::status(board).is_terminal() {
            return None;
        }

        let mut best: Option<(Position, i32)> = None;

        for pos in board.available_moves() {
            let mut next = *board;
            next.set(pos, Some(mover));

            let score = self.minimax(&next, mover, 0, false);

            // 严格大于才更新，保证同分时保留行优先顺序中的第一个
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((pos, score)),
            }
        }

        let (best_move, score) = best?;
        tracing::debug!(
            "搜索完成: mover={}, best={}, score={}, nodes={}",
            mover,
            best_move,
            score,
            self.nodes_searched
        );

        Some(SearchResult {
            best_move,
            score,
            nodes_searched: self.nodes_searched,
        })
    }

    /// Minimax 递归搜索
    ///
    /// `maximizing` 为 true 时轮到被优化方落子（取最大分），
    /// 否则轮到对方落子（取最小分）。每层消耗一个空格，
    /// 递归深度严格递减，至多 9 层后必然终止。
    fn minimax(&mut self, board: &Board, mover: Player, depth: i32, maximizing: bool) -> i32 {
        self.nodes_searched += 1;

        // 先判胜负再判满盘：满盘带胜者是获胜而非平局
        if let Some(winner) = Rules::winner(board) {
            return if winner == mover {
                10 - depth
            } else {
                -10 + depth
            };
        }
        if board.is_full() {
            return 0;
        }

        let side = if maximizing { mover } else { mover.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in board.available_moves() {
            let mut next = *board;
            next.set(pos, Some(side));

            let score = self.minimax(&next, mover, depth + 1, !maximizing);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new()
    }
}
