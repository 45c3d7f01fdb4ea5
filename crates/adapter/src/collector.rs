//! Score collector.
//!
//! Stand-in for the persistence service a score sink reports to. Accepts
//! line-delimited JSON on TCP and keeps one row per (player, frame), overwritten as
//! each throw of that frame arrives, plus the game's completion record.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::config::SinkConfig;
use crate::protocol::{parse_message, GameCompletedMessage, ParsedMessage, ScoreRecordMessage};

/// Stored state of one frame of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub player_id: u8,
    pub player_name: String,
    pub frame_number: u8,
    pub roll_1: Option<u8>,
    pub roll_2: Option<u8>,
    pub roll_3: Option<u8>,
    pub frame_score: u16,
    /// Running total through this frame once resolved.
    pub total_score: u16,
    /// Scores may still change: the frame is unfinished or waiting on bonus balls.
    pub pending: bool,
}

impl From<&ScoreRecordMessage> for FrameRow {
    fn from(msg: &ScoreRecordMessage) -> Self {
        Self {
            player_id: msg.player_id,
            player_name: msg.player_name.clone(),
            frame_number: msg.frame_number,
            roll_1: msg.roll_1,
            roll_2: msg.roll_2,
            roll_3: msg.roll_3,
            frame_score: msg.frame_score,
            total_score: msg.total_score,
            pending: msg.pending,
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    rows: BTreeMap<(u8, u8), FrameRow>,
    completed: Option<GameCompletedMessage>,
}

impl StoreInner {
    /// Settle rows of the same player whose bonus balls this message carries.
    fn resolve_earlier_frames(&mut self, msg: &ScoreRecordMessage) {
        let mut before = 0u16;
        for (frame_number, total) in (1u8..).zip(&msg.frame_totals) {
            let Some(total) = *total else {
                // Frames after a pending one are pending too.
                break;
            };
            if let Some(row) = self.rows.get_mut(&(msg.player_id, frame_number)) {
                if row.pending {
                    log::debug!(
                        "collector: player {} frame {} resolved at {}",
                        msg.player_id,
                        frame_number,
                        total
                    );
                }
                row.frame_score = total.saturating_sub(before);
                row.total_score = total;
                row.pending = false;
            }
            before = total;
        }
    }
}

/// Shared handle to the collected rows.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the row for the message's (player, frame).
    ///
    /// A score arriving after a completed game starts a new game.
    pub async fn upsert(&self, msg: &ScoreRecordMessage) {
        let mut inner = self.inner.write().await;
        if inner.completed.take().is_some() {
            log::info!("collector: new game, clearing {} rows", inner.rows.len());
            inner.rows.clear();
        }
        inner
            .rows
            .insert((msg.player_id, msg.frame_number), FrameRow::from(msg));
        inner.resolve_earlier_frames(msg);
    }

    pub async fn complete(&self, msg: GameCompletedMessage) {
        self.inner.write().await.completed = Some(msg);
    }

    /// All rows, ordered by player then frame.
    pub async fn rows(&self) -> Vec<FrameRow> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub async fn row(&self, player_id: u8, frame_number: u8) -> Option<FrameRow> {
        self.inner
            .read()
            .await
            .rows
            .get(&(player_id, frame_number))
            .cloned()
    }

    pub async fn completion(&self) -> Option<GameCompletedMessage> {
        self.inner.read().await.completed.clone()
    }
}

/// Run the collector until the listener fails.
///
/// Binds `config.host:config.port` (port 0 picks a free port) and reports the bound
/// address on `ready_tx`.
pub async fn run_collector(
    config: SinkConfig,
    store: ScoreStore,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let wire_log_tx = config.log_path.clone().map(spawn_wire_log);

    let listener = TcpListener::bind(config.endpoint()).await?;
    let bound = listener.local_addr()?;
    log::info!("collector listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut conn_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        conn_counter += 1;
        let conn_id = conn_counter;
        log::info!("collector: connection {} from {}", conn_id, addr);

        let store = store.clone();
        let wire_log_tx = wire_log_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, conn_id, store, wire_log_tx).await {
                log::warn!("collector: connection {} error: {}", conn_id, e);
            }
            log::info!("collector: connection {} closed", conn_id);
        });
    }
}

/// Run the collector on a dedicated runtime, blocking the calling thread.
pub fn run_collector_blocking(config: SinkConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_collector(config, ScoreStore::new(), None))
}

async fn handle_connection(
    socket: TcpStream,
    conn_id: usize,
    store: ScoreStore,
    wire_log_tx: Option<mpsc::UnboundedSender<String>>,
) -> anyhow::Result<()> {
    let mut reader = BufReader::new(socket);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(tx) = wire_log_tx.as_ref() {
            let _ = tx.send(trimmed.to_string());
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Score(msg)) => {
                log::debug!(
                    "collector: player {} frame {} rolls {:?}/{:?}/{:?}",
                    msg.player_id,
                    msg.frame_number,
                    msg.roll_1,
                    msg.roll_2,
                    msg.roll_3
                );
                store.upsert(&msg).await;
            }
            Ok(ParsedMessage::GameCompleted(msg)) => {
                log::info!("collector: game completed, winners {:?}", msg.winners);
                store.complete(msg).await;
            }
            Ok(ParsedMessage::Unknown { msg_type, seq }) => {
                log::warn!(
                    "collector: connection {} sent unknown type {:?} (seq {})",
                    conn_id,
                    msg_type,
                    seq
                );
            }
            Err(e) => {
                log::warn!("collector: connection {} rejected line: {}", conn_id, e);
            }
        }
    }
}

/// Append every received line to `path`.
fn spawn_wire_log(path: String) -> mpsc::UnboundedSender<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(e) => {
                log::warn!("collector: cannot open wire log {}: {}", path, e);
                return;
            }
        };
        while let Some(line) = rx.recv().await {
            if file.write_all(line.as_bytes()).await.is_err()
                || file.write_all(b"\n").await.is_err()
            {
                break;
            }
        }
        let _ = file.flush().await;
    });
    tx
}
