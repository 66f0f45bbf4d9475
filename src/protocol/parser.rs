//! Command parsing for the agent binary's line protocol.
//!
//! Commands, one per line:
//!   `position <snapshot-json>`  set the current position
//!   `depth <n>`                 set the search depth in plies
//!   `go`                        search and emit commands
//!   `newgame`                   clear all state
//!   `quit`                      exit

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Position { json: String },
    Depth(u32),
    Go,
    NewGame,
    Quit,
}

/// Parses one input line. Returns `None` for blank or unrecognized lines,
/// which the main loop silently skips.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (line, ""),
    };

    match keyword {
        "position" if !rest.is_empty() => Some(Command::Position {
            json: rest.to_string(),
        }),
        "depth" => rest.parse().ok().map(Command::Depth),
        "go" => Some(Command::Go),
        "newgame" => Some(Command::NewGame),
        "quit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("go"), Some(Command::Go));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("  go  "), Some(Command::Go));
    }

    #[test]
    fn parses_depth() {
        assert_eq!(parse_command("depth 4"), Some(Command::Depth(4)));
        assert_eq!(parse_command("depth x"), None);
        assert_eq!(parse_command("depth"), None);
    }

    #[test]
    fn parses_position_with_payload() {
        let cmd = parse_command(r#"position {"width": 4}"#);
        assert_eq!(
            cmd,
            Some(Command::Position {
                json: r#"{"width": 4}"#.to_string()
            })
        );
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn ignores_unknown_lines() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("frobnicate now"), None);
    }
}
