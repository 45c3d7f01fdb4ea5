//! Adapter module - reporting throws to an external score collector
//!
//! The scoring engine only knows the [`ScoreSink`](crate::core::ScoreSink) trait. This
//! crate provides the networked implementation and the collector it talks to.
//!
//! # Protocol Overview
//!
//! **Line-delimited JSON** over TCP, one message per accepted throw:
//!
//! 1. **Connection**: the sink connects lazily on the first record (default 127.0.0.1:7878)
//! 2. **Score records**: `score` messages mirror a per-frame storage row
//!    (`roll_1`..`roll_3`, `frame_score`, `total_score`), plus a `pending` flag and the
//!    player's running `frame_totals`, so the collector can settle earlier strike and
//!    spare rows once their bonus balls arrive
//! 3. **Completion**: a single `game_completed` message once the game is over
//!
//! Delivery is at most once. A record that cannot be written before the timeout is
//! logged and counted, never retried, and never blocks scoring.
//!
//! # Environment Variables
//!
//! - `BOWLING_SINK_HOST`: collector host (default `127.0.0.1`)
//! - `BOWLING_SINK_PORT`: collector port (default `7878`)
//! - `BOWLING_SINK_TIMEOUT_MS`: connect/write timeout (default `5000`)
//! - `BOWLING_SINK_QUEUE`: records buffered before the sink reports `QueueFull` (default `64`)
//! - `BOWLING_SINK_LOG_PATH`: mirror every line sent or received to this file
//! - `BOWLING_SINK_DISABLED`: `1`/`true` turns the sink off
//!
//! # Module Structure
//!
//! - [`config`]: environment configuration
//! - [`protocol`]: message types and parsing
//! - [`runtime`]: [`TcpScoreSink`], the background writer
//! - [`collector`]: TCP server that upserts one row per (player, frame)

pub mod collector;
pub mod config;
pub mod protocol;
pub mod runtime;

pub use bowling_core as core;
pub use bowling_types as types;

pub use collector::{run_collector, run_collector_blocking, FrameRow, ScoreStore};
pub use config::SinkConfig;
pub use protocol::{GameCompletedMessage, ParsedMessage, ScoreRecordMessage, SinkMessage};
pub use runtime::{SinkHealth, TcpScoreSink};
