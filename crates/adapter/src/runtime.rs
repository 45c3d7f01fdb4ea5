//! Score sink runtime.
//!
//! Bridges the synchronous scorekeeper with an async TCP writer. `notify_*` only
//! queues the record; a background task connects, writes and times out on its own.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;

use crate::config::SinkConfig;
use crate::core::{GameRecord, ScoreSink, SinkError, ThrowRecord};
use crate::protocol::{GameCompletedMessage, ScoreRecordMessage, SinkMessage};

/// Delivery counters shared with the background writer.
#[derive(Debug, Clone, Default)]
pub struct SinkHealth {
    delivered: Arc<AtomicU32>,
    failed: Arc<AtomicU32>,
}

impl SinkHealth {
    /// Records written to the collector.
    pub fn delivered(&self) -> u32 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Records dropped after being queued (connect or write failed or timed out).
    pub fn failed(&self) -> u32 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// [`ScoreSink`] that streams records to a collector over TCP.
pub struct TcpScoreSink {
    /// Owned runtime when started outside of tokio; `None` when spawned on a caller's runtime.
    _rt: Option<Runtime>,
    tx: mpsc::Sender<SinkMessage>,
    seq: AtomicU64,
    health: SinkHealth,
}

impl TcpScoreSink {
    /// Start the sink from environment variables on its own runtime.
    ///
    /// Returns None if `BOWLING_SINK_DISABLED` is set or the runtime cannot start.
    pub fn start_from_env() -> Option<Self> {
        if SinkConfig::is_disabled() {
            log::info!("score sink disabled via BOWLING_SINK_DISABLED");
            return None;
        }
        match Self::start(SinkConfig::from_env()) {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("score sink unavailable: {}", e);
                None
            }
        }
    }

    /// Start on a dedicated runtime. For callers that are not already inside tokio.
    pub fn start(config: SinkConfig) -> std::io::Result<Self> {
        let rt = Runtime::new()?;
        let mut sink = Self::spawn_on(rt.handle(), config);
        sink._rt = Some(rt);
        Ok(sink)
    }

    /// Spawn the writer on an existing runtime.
    pub fn spawn_on(handle: &Handle, config: SinkConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let health = SinkHealth::default();
        handle.spawn(run_writer(config, rx, health.clone()));

        Self {
            _rt: None,
            tx,
            seq: AtomicU64::new(0),
            health,
        }
    }

    pub fn health(&self) -> SinkHealth {
        self.health.clone()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn enqueue(&self, msg: SinkMessage) -> Result<(), SinkError> {
        self.tx.try_send(msg).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SinkError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => SinkError::Disconnected,
        })
    }
}

impl ScoreSink for TcpScoreSink {
    fn notify_throw(&self, record: &ThrowRecord) -> Result<(), SinkError> {
        let msg = ScoreRecordMessage::from_record(self.next_seq(), record);
        self.enqueue(SinkMessage::Score(msg))
    }

    fn notify_game_over(&self, record: &GameRecord) -> Result<(), SinkError> {
        let msg = GameCompletedMessage::from_record(self.next_seq(), record);
        self.enqueue(SinkMessage::GameCompleted(msg))
    }
}

/// Drain the queue, writing each record once.
async fn run_writer(config: SinkConfig, mut rx: mpsc::Receiver<SinkMessage>, health: SinkHealth) {
    let endpoint = config.endpoint();
    let timeout = config.timeout();
    let mut wire_log = open_wire_log(config.log_path.as_deref()).await;
    let mut conn: Option<TcpStream> = None;
    let mut line: Vec<u8> = Vec::with_capacity(512);

    while let Some(msg) = rx.recv().await {
        line.clear();
        if let Err(e) = msg.write_json(&mut line) {
            let err = SinkError::Encode(e.to_string());
            log::warn!("score sink: dropping record {}: {}", msg.seq(), err);
            health.failed.fetch_add(1, Ordering::Relaxed);
            continue;
        }
        line.push(b'\n');

        match deliver(&mut conn, &endpoint, timeout, &line).await {
            Ok(()) => {
                health.delivered.fetch_add(1, Ordering::Relaxed);
                if let Some(file) = wire_log.as_mut() {
                    if file.write_all(&line).await.is_err() || file.flush().await.is_err() {
                        wire_log = None;
                    }
                }
            }
            Err(e) => {
                log::warn!("score sink: record {} to {} lost: {}", msg.seq(), endpoint, e);
                health.failed.fetch_add(1, Ordering::Relaxed);
                // Reconnect on the next record.
                conn = None;
            }
        }
    }

    if let Some(mut file) = wire_log {
        let _ = file.flush().await;
    }
}

async fn deliver(
    conn: &mut Option<TcpStream>,
    endpoint: &str,
    timeout: Duration,
    line: &[u8],
) -> Result<(), SinkError> {
    let timeout_ms = timeout.as_millis() as u64;

    if conn.is_none() {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(endpoint))
            .await
            .map_err(|_| SinkError::Timeout(timeout_ms))?
            .map_err(|e| SinkError::Io(e.to_string()))?;
        log::info!("score sink connected to {}", endpoint);
        *conn = Some(stream);
    }
    let Some(stream) = conn.as_mut() else {
        return Err(SinkError::Disconnected);
    };

    let write = async {
        stream.write_all(line).await?;
        stream.flush().await?;
        Ok::<_, std::io::Error>(())
    };
    tokio::time::timeout(timeout, write)
        .await
        .map_err(|_| SinkError::Timeout(timeout_ms))?
        .map_err(|e| SinkError::Io(e.to_string()))
}

async fn open_wire_log(path: Option<&str>) -> Option<File> {
    let path = path?;
    match OpenOptions::new().create(true).append(true).open(path).await {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("score sink: cannot open wire log {}: {}", path, e);
            None
        }
    }
}
