//! Protocol module - JSON message types for the score sink
//!
//! Every message carries `type`, `seq` (per-sink sequence number, starting at 1)
//! and `ts` (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::core::{GameRecord, ThrowRecord};
use crate::types::FrameTotal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScoreType {
    #[default]
    #[serde(rename = "score")]
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameCompletedType {
    #[default]
    #[serde(rename = "game_completed")]
    GameCompleted,
}

/// One accepted throw, laid out like the per-frame storage row it updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecordMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ScoreType,
    pub seq: u64,
    pub ts: u64,
    /// 0-based roster position
    pub player_id: u8,
    pub player_name: String,
    /// 1-based
    pub frame_number: u8,
    /// 0-based index of the throw being reported
    pub throw_index: u8,
    pub pins: u8,
    pub roll_1: Option<u8>,
    pub roll_2: Option<u8>,
    pub roll_3: Option<u8>,
    /// Bonus-inclusive once resolved, otherwise the pins bowled so far.
    pub frame_score: u16,
    /// Running total through this frame once resolved, otherwise the player's
    /// latest resolved total.
    pub total_score: u16,
    /// `frame_score` and `total_score` may still change.
    #[serde(default)]
    pub pending: bool,
    /// Running total under each frame bowled so far, `null` while pending.
    #[serde(default)]
    pub frame_totals: Vec<Option<u16>>,
}

impl ScoreRecordMessage {
    pub fn from_record(seq: u64, record: &ThrowRecord) -> Self {
        let [roll_1, roll_2, roll_3] = record.rolls;
        let frame_totals: Vec<Option<u16>> = record
            .frame_totals
            .iter()
            .take_while(|t| **t != FrameTotal::Unplayed)
            .map(FrameTotal::value)
            .collect();
        let total_score = frame_totals
            .get(record.frame_number.saturating_sub(1) as usize)
            .copied()
            .flatten()
            .unwrap_or(record.cumulative_total);

        Self {
            msg_type: ScoreType::Score,
            seq,
            ts: current_timestamp_ms(),
            player_id: record.player.0,
            player_name: record.player_name.clone(),
            frame_number: record.frame_number,
            throw_index: record.throw_index,
            pins: record.pins,
            roll_1,
            roll_2,
            roll_3,
            frame_score: record.frame_score,
            total_score,
            pending: record.is_pending(),
            frame_totals,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompletedMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: GameCompletedType,
    pub seq: u64,
    pub ts: u64,
    /// More than one entry means a tie.
    pub winners: Vec<u8>,
    /// Final totals in roster order.
    pub totals: Vec<u16>,
    pub throws: u32,
}

impl GameCompletedMessage {
    pub fn from_record(seq: u64, record: &GameRecord) -> Self {
        Self {
            msg_type: GameCompletedType::GameCompleted,
            seq,
            ts: current_timestamp_ms(),
            winners: record.winners.iter().map(|p| p.0).collect(),
            totals: record.totals.clone(),
            throws: record.throws,
        }
    }
}

/// Anything the sink writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkMessage {
    Score(ScoreRecordMessage),
    GameCompleted(GameCompletedMessage),
}

impl SinkMessage {
    pub fn seq(&self) -> u64 {
        match self {
            SinkMessage::Score(m) => m.seq,
            SinkMessage::GameCompleted(m) => m.seq,
        }
    }

    /// Serialize as one JSON line (without the trailing newline).
    pub fn write_json(&self, buf: &mut Vec<u8>) -> serde_json::Result<()> {
        match self {
            SinkMessage::Score(m) => serde_json::to_writer(buf, m),
            SinkMessage::GameCompleted(m) => serde_json::to_writer(buf, m),
        }
    }
}

/// Parsed incoming line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Score(ScoreRecordMessage),
    GameCompleted(GameCompletedMessage),
    Unknown { msg_type: String, seq: u64 },
}

/// Parse one line. Well-formed JSON with an unrecognised `type` is reported as
/// [`ParsedMessage::Unknown`] rather than as an error.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Inbound {
        #[serde(rename = "score")]
        Score(ScoreRecordMessage),
        #[serde(rename = "game_completed")]
        GameCompleted(GameCompletedMessage),
    }

    match serde_json::from_str::<Inbound>(json) {
        Ok(Inbound::Score(m)) => Ok(ParsedMessage::Score(m)),
        Ok(Inbound::GameCompleted(m)) => Ok(ParsedMessage::GameCompleted(m)),
        Err(e) => {
            #[derive(Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            match envelope.msg_type {
                Some(t) if t != "score" && t != "game_completed" => Ok(ParsedMessage::Unknown {
                    msg_type: t,
                    seq: envelope.seq.unwrap_or(0),
                }),
                _ => Err(e),
            }
        }
    }
}

fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
