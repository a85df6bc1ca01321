//! 井字棋 AI 引擎
//!
//! 包含:
//! - 完全展开的 Minimax 对抗搜索
//! - 确定性的同分走法裁决（行优先取先）
//! - 节点统计

mod search;

pub use search::{AiEngine, SearchResult};
