//! 井字棋对局控制
//!
//! 包含:
//! - 会话状态机（等待 / 进行中 / 已结束）
//! - 模式与执子方选择
//! - 人机模式下的 AI 自动应手

mod session;

pub use session::{GameMode, GameSession, GameSnapshot, SessionState};
