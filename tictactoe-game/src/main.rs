use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tictactoe_core::{GameError, GameStatus, Player};
use tictactoe_game::{GameMode, GameSession, GameSnapshot, SessionState};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tictactoe_game=info".parse()?),
        )
        .init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = GameSession::new();

    println!("井字棋");
    println!("模式: 1 = 双人对战, 2 = 人机对战");
    print!("> ");
    io::stdout().flush()?;

    if let Some(line) = lines.next() {
        if line?.trim() == "2" {
            session.set_mode(GameMode::HumanVsAi)?;
            println!("执子方: x = 先手, o = 后手");
            print!("> ");
            io::stdout().flush()?;
            if let Some(line) = lines.next() {
                if line?.trim().eq_ignore_ascii_case("o") {
                    session.select_player(Player::O)?;
                }
            }
        }
    }

    let snapshot = session.start_game()?;
    render(&snapshot);

    println!("输入走法: 行 列（0-2），如 \"1 2\"");
    loop {
        print!("{} > ", session.snapshot().current_player);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let Some((row, col)) = parse_move(&line) else {
            println!("无法解析走法: {}", line.trim());
            continue;
        };

        match session.make_move(row, col) {
            Ok(snapshot) => {
                render(&snapshot);
                if snapshot.state == SessionState::Finished {
                    match snapshot.status {
                        GameStatus::Win(player) => println!("{player} 获胜!"),
                        GameStatus::Draw => println!("平局!"),
                        GameStatus::InProgress => {}
                    }
                    break;
                }
            }
            Err(err @ (GameError::InvalidPosition { .. } | GameError::CellOccupied { .. })) => {
                println!("走法无效: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// 解析 "行 列" 输入
fn parse_move(line: &str) -> Option<(u8, u8)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

/// 渲染棋盘快照
fn render(snapshot: &GameSnapshot) {
    println!();
    println!("{}", snapshot.board);
    println!();
}
