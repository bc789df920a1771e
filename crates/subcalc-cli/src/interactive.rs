//! Prompt loop: read a CIDR block per line and print its summary

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use subcalc_cidr::Network;

use crate::output::{write_summary, OutputFormat};

const PROMPT: &str = "network (a.b.c.d/n, q to quit)> ";

/// Lines answered by the loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub parsed: usize,
    pub rejected: usize,
}

/// Run until EOF or a quit command
///
/// Parse failures are reported on `out` and the loop prompts again; only I/O
/// errors end the session early.
pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W, format: OutputFormat) -> Result<SessionStats> {
    let mut stats = SessionStats::default();
    let mut line = String::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text, "q" | "quit" | "exit") {
            break;
        }

        match Network::parse(text) {
            Ok(network) => {
                tracing::debug!(%network, "parsed network");
                stats.parsed += 1;
                write_summary(out, &network.summary(), format)?;
            }
            Err(e) => {
                tracing::debug!(input = text, error = %e, "rejected input");
                stats.rejected += 1;
                writeln!(out, "{} {}", "error:".red().bold(), e)?;
            }
        }
    }

    tracing::info!(parsed = stats.parsed, rejected = stats.rejected, "session ended");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> (SessionStats, String) {
        let mut out = Vec::new();
        let stats = run(Cursor::new(input), &mut out, OutputFormat::Human).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_then_eof() {
        let (stats, text) = session("192.168.1.141/26\n");
        assert_eq!(stats, SessionStats { parsed: 1, rejected: 0 });
        assert!(text.contains("192.168.1.190"));
    }

    #[test]
    fn test_error_reprompts() {
        let (stats, text) = session("1.2.3/24\n10.0.0.0/8\n");
        assert_eq!(stats, SessionStats { parsed: 1, rejected: 1 });
        assert!(text.contains("Malformed network"));
        assert!(text.contains("10.255.255.255"));
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (stats, _) = session("\n  \nquit\n10.0.0.0/8\n");
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn test_prefix_error_message() {
        let (stats, text) = session("10.0.0.0/40\nq\n");
        assert_eq!(stats.rejected, 1);
        assert!(text.contains("Prefix out of range"));
    }
}
