use std::io::BufRead;

use common::games::snake::{GridCoord, SnakeCommand, Turn};
use common::{log, log_warn};
use tokio::sync::mpsc::UnboundedSender;

pub const HELP: &str = "commands: l/r/u/d turn, o <fx> <fy> <fz> <ux> <uy> <uz> orient, n restart, f food, q quit";

/// Parses one line of console input. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<SnakeCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_ascii_lowercase();
    let command = match head.as_str() {
        "l" | "left" => SnakeCommand::Turn(Turn::Left),
        "r" | "right" => SnakeCommand::Turn(Turn::Right),
        "u" | "up" => SnakeCommand::Turn(Turn::Up),
        "d" | "down" => SnakeCommand::Turn(Turn::Down),
        "n" | "restart" => SnakeCommand::Restart,
        "f" | "food" => SnakeCommand::SpawnFood,
        "q" | "quit" => SnakeCommand::Shutdown,
        "o" | "orient" => {
            let values = parts
                .map(|p| p.parse::<i32>().ok())
                .collect::<Option<Vec<_>>>()?;
            let [fx, fy, fz, ux, uy, uz] = values.as_slice() else {
                return None;
            };
            return Some(SnakeCommand::SetOrientation {
                forward: GridCoord::new(*fx, *fy, *fz),
                up: GridCoord::new(*ux, *uy, *uz),
            });
        }
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(command)
}

/// Forwards console commands to the session until stdin closes or the session
/// stops listening. Runs on a plain thread so a pending read never holds up
/// runtime shutdown.
pub fn spawn_console_reader(command_tx: UnboundedSender<SnakeCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(command) => {
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                None => log_warn!("Unrecognized input '{}'; {}", line.trim(), HELP),
            }
        }
        log!("Console input closed");
    });
}
