//! Command-line parsing for the `bowling-tracker` binary.

use anyhow::{anyhow, Result};

use crate::adapter::SinkConfig;
use crate::types::MAX_PLAYERS;

pub const USAGE: &str = "\
usage:
  bowling-tracker play <name>...                 keep score for 1-5 bowlers
  bowling-tracker collect [--host H] [--port P]  run a score collector

environment:
  BOWLING_SINK_HOST, BOWLING_SINK_PORT, BOWLING_SINK_TIMEOUT_MS, BOWLING_SINK_QUEUE,
  BOWLING_SINK_LOG_PATH, BOWLING_SINK_DISABLED, RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play { names: Vec<String> },
    Collect(SinkConfig),
    Help,
}

/// Parse arguments (without the program name).
///
/// `collect` starts from `base` (normally [`SinkConfig::from_env`]) so the collector
/// listens where the sink will connect unless overridden.
pub fn parse_args(args: &[String], base: SinkConfig) -> Result<Command> {
    let Some(cmd) = args.first() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "play" => {
            let names = args[1..].to_vec();
            if names.is_empty() {
                return Err(anyhow!("play: at least one bowler name is required"));
            }
            if names.len() > MAX_PLAYERS {
                return Err(anyhow!(
                    "play: at most {} bowlers, got {}",
                    MAX_PLAYERS,
                    names.len()
                ));
            }
            Ok(Command::Play { names })
        }
        "collect" => parse_collect(&args[1..], base).map(Command::Collect),
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

fn parse_collect(args: &[String], mut config: SinkConfig) -> Result<SinkConfig> {
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("collect: missing value for --host"))?;
                config.host = v.clone();
            }
            "--port" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("collect: missing value for --port"))?;
                config.port = v
                    .parse::<u16>()
                    .map_err(|_| anyhow!("collect: invalid --port value: {}", v))?;
            }
            other => {
                return Err(anyhow!("collect: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}
