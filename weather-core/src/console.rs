//! Line-based command session on top of any async reader.

use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::export::Exporter;

pub const BANNER: &str = "\n==================================================\n\
Weather data collector is up and running.\n\
==================================================\n\
\n\
Usage:\n\
1. Weather data is collected automatically on a fixed interval (3 minutes by default).\n\
2. Type \"export\" to save the latest readings to an Excel file.\n\
3. Type \"exit\" to quit.\n\
\n\
Waiting for a command...";

pub const PROMPT: &str = "Enter a command (export/exit): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Export,
    Exit,
    Unknown(String),
}

impl Command {
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "export" => Command::Export,
            "exit" => Command::Exit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit`.
    Exit,
    /// Input reached end of file.
    InputClosed,
}

/// Print the banner, then read and dispatch commands until `exit` or end of input.
///
/// A failed export is reported on `out` and the session carries on.
pub async fn run_session<R, W>(input: R, out: &mut W, exporter: &Exporter) -> io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{BANNER}")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(SessionEnd::InputClosed);
        };

        match Command::parse(&line) {
            Command::Export => match exporter.export() {
                Ok(path) => writeln!(out, "Data exported to file: {}", path.display())?,
                Err(err) => {
                    tracing::error!("export failed: {err}");
                    writeln!(out, "Export failed: {err}")?;
                }
            },
            Command::Exit => {
                writeln!(out, "Shutting down...")?;
                out.flush()?;
                return Ok(SessionEnd::Exit);
            }
            Command::Unknown(cmd) => {
                writeln!(out, "Unknown command \"{cmd}\". Type \"export\" or \"exit\".")?;
            }
        }
    }
}
