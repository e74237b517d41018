//! Line-oriented text protocol for driving a play session.
//!
//! The framing follows GTP: each request is an optional numeric id, a
//! command and its arguments. Responses start with `=` on success or `?` on
//! failure, followed by the id (if any) and a message, and end with a blank
//! line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `mode <manual|greedy|solver>` - Set the play mode (setup only)
//! - `closed <on|off>` - Prefer closed tours (setup only)
//! - `start <square>` - Place the knight and begin
//! - `move <square>` - Move the knight (manual mode)
//! - `hint` - Suggest the next square
//! - `step` - Advance one square (greedy/solver mode)
//! - `run` - Advance until the tour ends
//! - `showboard` - Print the numbered grid
//! - `history` - List visited squares
//! - `status` - Status, progress and counters
//! - `reset` - Start over
//!
//! ## Example
//!
//! ```ignore
//! use knights_tour::protocol::TourShell;
//! let mut shell = TourShell::new();
//! shell.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::SessionConfig;
use crate::position::{Position, parse_coord};
use crate::session::{Mode, Session};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "closed",
    "hint",
    "history",
    "known_command",
    "list_commands",
    "mode",
    "move",
    "name",
    "quit",
    "reset",
    "run",
    "showboard",
    "start",
    "status",
    "step",
    "version",
];

/// Protocol front end owning one session.
pub struct TourShell {
    session: Session,
}

impl Default for TourShell {
    fn default() -> Self {
        Self::new()
    }
}

impl TourShell {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();
            debug!(%command, ?args, "protocol command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn square_arg(args: &[&str]) -> Result<Position, String> {
        let arg = args.first().ok_or("missing argument")?;
        parse_coord(arg).map_err(|e| e.to_string())
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match self.dispatch(command, args) {
            Ok(message) => (true, message),
            Err(message) => (false, message),
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        match command {
            "name" => Ok("knights-tour".to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "mode" => {
                let arg = args.first().ok_or("missing argument")?;
                let mode: Mode = arg.parse()?;
                self.session.set_mode(mode).map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "closed" => {
                let prefer_closed = match args.first().map(|a| a.to_lowercase()) {
                    Some(a) if a == "on" || a == "true" => true,
                    Some(a) if a == "off" || a == "false" => false,
                    Some(a) => return Err(format!("expected on or off, got {a}")),
                    None => return Err("missing argument".to_string()),
                };
                self.session
                    .set_prefer_closed(prefer_closed)
                    .map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "start" => {
                let square = Self::square_arg(args)?;
                let status = self.session.start(square).map_err(|e| e.to_string())?;
                Ok(status.to_string())
            }

            "move" => {
                let square = Self::square_arg(args)?;
                let status = self.session.make_move(square).map_err(|e| e.to_string())?;
                Ok(status.to_string())
            }

            "hint" => {
                let hint = self.session.hint().map_err(|e| e.to_string())?;
                Ok(hint.map_or_else(|| "none".to_string(), |sq| sq.to_string()))
            }

            "step" => {
                let moved = self.session.tick().map_err(|e| e.to_string())?;
                let square = moved.map_or_else(|| "none".to_string(), |sq| sq.to_string());
                Ok(format!("{square} {}", self.session.status()))
            }

            "run" => {
                let status = self.session.run().map_err(|e| e.to_string())?;
                Ok(format!("{status} {}", self.session.path().len()))
            }

            "showboard" => Ok(format!("\n{}", self.session.grid()).trim_end().to_string()),

            "history" => Ok(self
                .session
                .history()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join("\n")),

            "status" => {
                let s = &self.session;
                let stats = s.stats();
                Ok(format!(
                    "{} mode={} closed={} moves={}/64 progress={}% hints={} nodes={} backtracks={}",
                    s.status(),
                    s.mode(),
                    s.prefer_closed(),
                    s.path().len(),
                    s.progress(),
                    stats.hints,
                    stats.nodes,
                    stats.backtracks
                ))
            }

            "reset" => {
                self.session.reset();
                Ok(String::new())
            }

            _ => Err(format!("unknown command: {command}")),
        }
    }
}
