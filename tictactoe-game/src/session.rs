//! 对局控制
//!
//! `GameSession` 独占持有唯一的对局状态，对外暴露命令/查询接口，
//! 表现层只消费返回的快照，不直接持有内部状态。

use serde::{Deserialize, Serialize};

use tictactoe_ai::AiEngine;
use tictactoe_core::{Board, GameError, GameStatus, Player, Position, Result, Rules};

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// 双人对战
    HumanVsHuman,
    /// 人机对战
    HumanVsAi,
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// 等待开始（可选择模式和执子方）
    Waiting,
    /// 对局进行中
    Playing,
    /// 对局已结束
    Finished,
}

/// 对局状态快照（表现层只读视图）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Player,
    pub status: GameStatus,
    pub mode: GameMode,
    pub human_symbol: Player,
    pub state: SessionState,
}

/// 对局会话
pub struct GameSession {
    board: Board,
    current_player: Player,
    status: GameStatus,
    mode: GameMode,
    /// 人机模式下人类的执子方
    human_symbol: Player,
    state: SessionState,
    engine: AiEngine,
}

impl GameSession {
    /// 创建新会话（默认双人模式，人类执 X）
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            mode: GameMode::HumanVsHuman,
            human_symbol: Player::X,
            state: SessionState::Waiting,
            engine: AiEngine::new(),
        }
    }

    /// 以指定模式与执子方创建会话
    pub fn initialize(mode: GameMode, human_symbol: Player) -> Self {
        let mut session = Self::new();
        session.mode = mode;
        session.human_symbol = human_symbol;
        session
    }

    /// 设置对局模式（仅开局前）
    pub fn set_mode(&mut self, mode: GameMode) -> Result<()> {
        if self.state != SessionState::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        self.mode = mode;
        Ok(())
    }

    /// 选择人类执子方（仅开局前，仅人机模式有意义）
    pub fn select_player(&mut self, symbol: Player) -> Result<()> {
        if self.state != SessionState::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        self.human_symbol = symbol;
        Ok(())
    }

    /// 开始对局
    ///
    /// 换上空棋盘并进入 Playing。人机模式下若 AI 执先手（人类选 O），
    /// AI 的开局走法在返回前计算并落盘，该走法保留而不被清空。
    pub fn start_game(&mut self) -> Result<GameSnapshot> {
        match self.state {
            SessionState::Waiting => {}
            SessionState::Playing => return Err(GameError::GameAlreadyStarted),
            SessionState::Finished => return Err(GameError::GameOver),
        }

        self.begin_round();
        tracing::info!(
            "对局开始: mode={:?}, human={}",
            self.mode,
            self.human_symbol
        );
        Ok(self.snapshot())
    }

    /// 人类落子
    ///
    /// 守卫顺序：会话状态、坐标范围、格子占用。任何一步被拒时
    /// 会话状态保持原样。落子成功后重算胜负；若对局仍在进行且
    /// 人机模式下轮到 AI，则 AI 立即回一着（每次人类落子至多
    /// 追加一着 AI 走法），随后再次重算胜负。
    pub fn make_move(&mut self, row: u8, col: u8) -> Result<GameSnapshot> {
        match self.state {
            SessionState::Waiting => return Err(GameError::GameNotStarted),
            SessionState::Finished => return Err(GameError::GameOver),
            SessionState::Playing => {}
        }

        let pos = Position::new(row, col).ok_or(GameError::InvalidPosition { row, col })?;
        let mover = self.current_player;
        self.board = self.board.place(pos, mover)?;
        tracing::debug!("落子: {} -> {}", mover, pos);

        if self.refresh_status() {
            return Ok(self.snapshot());
        }

        self.current_player = self.current_player.opponent();
        self.auto_reply();

        Ok(self.snapshot())
    }

    /// 软重置：保留模式与执子方，换新棋盘直接开局
    ///
    /// 仅对已开始过的对局有意义；开局前应走 `start_game`。
    pub fn reset_game(&mut self) -> Result<GameSnapshot> {
        if self.state == SessionState::Waiting {
            return Err(GameError::GameNotStarted);
        }
        self.begin_round();
        tracing::info!("对局重置（保留模式与执子方）");
        Ok(self.snapshot())
    }

    /// 完全重置：清空模式与执子方选择，回到等待状态
    pub fn reset_page(&mut self) -> GameSnapshot {
        *self = Self::new();
        tracing::info!("会话完全重置");
        self.snapshot()
    }

    /// 获取当前状态快照
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_player: self.current_player,
            status: self.status,
            mode: self.mode,
            human_symbol: self.human_symbol,
            state: self.state,
        }
    }

    /// 换新棋盘进入对局，AI 执先手时先让 AI 落开局一着
    fn begin_round(&mut self) {
        self.board = Board::empty();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.state = SessionState::Playing;
        self.auto_reply();
    }

    /// 轮到 AI 时让 AI 落一着并重算胜负；否则什么都不做
    fn auto_reply(&mut self) {
        if self.state != SessionState::Playing
            || self.mode != GameMode::HumanVsAi
            || self.current_player == self.human_symbol
        {
            return;
        }

        let ai = self.current_player;
        if let Some(pos) = self.engine.best_move(&self.board, ai) {
            // 引擎只会返回空格，落盘失败即不变量被破坏
            match self.board.place(pos, ai) {
                Ok(next) => {
                    self.board = next;
                    tracing::info!(
                        "AI 落子: {} -> {}, nodes={}",
                        ai,
                        pos,
                        self.engine.nodes_searched()
                    );
                }
                Err(err) => {
                    tracing::error!("AI 走法落盘失败: {} -> {}, {}", ai, pos, err);
                }
            }
        }

        if !self.refresh_status() {
            self.current_player = self.human_symbol;
        }
    }

    /// 重算对局状态（先胜负后平局），终局时进入 Finished
    ///
    /// 返回对局是否已结束。
    fn refresh_status(&mut self) -> bool {
        self.status = Rules::status(&self.board);
        if self.status.is_terminal() {
            self.state = SessionState::Finished;
            tracing::info!("对局结束: {:?}", self.status);
            true
        } else {
            false
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_pvp() -> GameSession {
        let mut session = GameSession::new();
        session.start_game().unwrap();
        session
    }

    #[test]
    fn test_move_before_start_rejected() {
        let mut session = GameSession::new();
        assert_eq!(session.make_move(0, 0), Err(GameError::GameNotStarted));
    }

    #[test]
    fn test_soft_reset_before_start_rejected() {
        let mut session = GameSession::new();
        assert_eq!(session.reset_game(), Err(GameError::GameNotStarted));
        // 被拒后会话保持等待状态
        assert_eq!(session.snapshot().state, SessionState::Waiting);
    }

    #[test]
    fn test_mode_change_after_start_rejected() {
        let mut session = started_pvp();
        assert_eq!(
            session.set_mode(GameMode::HumanVsAi),
            Err(GameError::GameAlreadyStarted)
        );
        assert_eq!(
            session.select_player(Player::O),
            Err(GameError::GameAlreadyStarted)
        );
    }

    #[test]
    fn test_mode_change_does_not_touch_board() {
        let mut session = GameSession::new();
        session.set_mode(GameMode::HumanVsAi).unwrap();
        session.select_player(Player::O).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.board, Board::empty());
        assert_eq!(snap.state, SessionState::Waiting);
        assert_eq!(snap.mode, GameMode::HumanVsAi);
        assert_eq!(snap.human_symbol, Player::O);
    }

    #[test]
    fn test_turn_alternation_pvp() {
        let mut session = started_pvp();

        let snap = session.make_move(0, 0).unwrap();
        assert_eq!(snap.current_player, Player::O);
        assert_eq!(snap.board.get(Position::new_unchecked(0, 0)), Some(Player::X));

        let snap = session.make_move(1, 1).unwrap();
        assert_eq!(snap.current_player, Player::X);
        assert_eq!(snap.board.get(Position::new_unchecked(1, 1)), Some(Player::O));
    }

    #[test]
    fn test_rejected_move_leaves_session_unchanged() {
        let mut session = started_pvp();
        session.make_move(1, 1).unwrap();

        let before = session.snapshot();
        assert_eq!(session.make_move(1, 1), Err(GameError::CellOccupied { row: 1, col: 1 }));
        assert_eq!(session.make_move(5, 0), Err(GameError::InvalidPosition { row: 5, col: 0 }));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_win_finishes_session() {
        let mut session = started_pvp();
        // X: 顶行；O: 中行两格
        session.make_move(0, 0).unwrap();
        session.make_move(1, 0).unwrap();
        session.make_move(0, 1).unwrap();
        session.make_move(1, 1).unwrap();
        let snap = session.make_move(0, 2).unwrap();

        assert_eq!(snap.status, GameStatus::Win(Player::X));
        assert_eq!(snap.state, SessionState::Finished);

        // 终局后拒绝落子
        assert_eq!(session.make_move(2, 2), Err(GameError::GameOver));
    }

    #[test]
    fn test_ai_replies_one_ply() {
        let mut session = GameSession::initialize(GameMode::HumanVsAi, Player::X);
        session.start_game().unwrap();

        let snap = session.make_move(0, 0).unwrap();
        // 人类 X 一着，AI O 回一着，控制权回到人类
        let marks = snap.board.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(marks, 2);
        assert_eq!(snap.current_player, Player::X);
        // 对角开局的唯一不败应着是中心
        assert_eq!(snap.board.get(Position::new_unchecked(1, 1)), Some(Player::O));
    }

    #[test]
    fn test_ai_opening_move_persists() {
        let mut session = GameSession::initialize(GameMode::HumanVsAi, Player::O);
        let snap = session.start_game().unwrap();

        // 人类执 O 时 AI (X) 的开局走法在开局时已落盘且保留
        assert_eq!(snap.board.get(Position::new_unchecked(0, 0)), Some(Player::X));
        assert_eq!(snap.current_player, Player::O);
        assert_eq!(snap.state, SessionState::Playing);
    }

    #[test]
    fn test_soft_reset_keeps_selection() {
        let mut session = GameSession::initialize(GameMode::HumanVsAi, Player::O);
        session.start_game().unwrap();
        session.make_move(1, 1).unwrap();

        let snap = session.reset_game().unwrap();
        assert_eq!(snap.mode, GameMode::HumanVsAi);
        assert_eq!(snap.human_symbol, Player::O);
        assert_eq!(snap.state, SessionState::Playing);
        // 软重置后 AI 开局走法同样落盘
        assert_eq!(snap.board.get(Position::new_unchecked(0, 0)), Some(Player::X));
    }

    #[test]
    fn test_full_reset_clears_selection() {
        let mut session = GameSession::initialize(GameMode::HumanVsAi, Player::O);
        session.start_game().unwrap();

        let snap = session.reset_page();
        assert_eq!(snap.state, SessionState::Waiting);
        assert_eq!(snap.mode, GameMode::HumanVsHuman);
        assert_eq!(snap.human_symbol, Player::X);
        assert_eq!(snap.board, Board::empty());
    }

    #[test]
    fn test_ai_game_plays_to_draw() {
        // 人机双方都按最优走法走完整局，必为平局
        let mut session = GameSession::initialize(GameMode::HumanVsAi, Player::O);
        session.start_game().unwrap();

        let mut helper = AiEngine::new();
        loop {
            let snap = session.snapshot();
            if snap.state == SessionState::Finished {
                assert_eq!(snap.status, GameStatus::Draw);
                break;
            }
            let pos = helper.best_move(&snap.board, Player::O).unwrap();
            session.make_move(pos.row, pos.col).unwrap();
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let mut session = started_pvp();
        session.make_move(2, 0).unwrap();

        let snap = session.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }
}
