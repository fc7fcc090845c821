//! Wire types for the replay WebSocket protocol.
//!
//! The transport itself lives with the host application; these types fix
//! the JSON shapes exchanged with the replay server: client commands
//! (`start`/`pause`/`resume`/`stop`) and server stream messages carrying
//! bars or status updates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use plotline_core::{Candle, Timeframe};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for the replay speed multiplier.
pub const MAX_SPEED: f64 = 10.0;

/// Protocol errors.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("failed to decode message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("replay speed {0} out of range (must be > 0 and <= {MAX_SPEED})")]
    InvalidSpeed(f64),
    #[error("unparseable bar timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("unknown timeframe: {0}")]
    InvalidTimeframe(String),
}

fn default_timeframe() -> String {
    "1h".to_string()
}

fn default_speed() -> f64 {
    1.0
}

/// A client command, tagged by its `command` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum ReplayCommand {
    Start {
        symbol: String,
        #[serde(default = "default_timeframe")]
        timeframe: String,
        #[serde(default = "default_speed")]
        speed: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_date: Option<String>,
    },
    Pause,
    Resume,
    Stop,
}

impl ReplayCommand {
    /// Decode a command from JSON, rejecting out-of-range speeds and
    /// unknown timeframe labels.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let command: Self = serde_json::from_str(json)?;
        if let ReplayCommand::Start {
            speed, timeframe, ..
        } = &command
        {
            if !speed.is_finite() || *speed <= 0.0 || *speed > MAX_SPEED {
                return Err(ProtocolError::InvalidSpeed(*speed));
            }
            if Timeframe::parse(timeframe).is_none() {
                return Err(ProtocolError::InvalidTimeframe(timeframe.clone()));
            }
        }
        Ok(command)
    }

    /// Encode the command as JSON.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Server-to-client message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Connected,
    Bar,
    Paused,
    Resumed,
    Stopped,
    Complete,
    Error,
}

/// One OHLCV bar as it appears on the wire (ISO-8601 timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBar {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl WireBar {
    /// Convert to a core candle, parsing the ISO timestamp.
    pub fn to_candle(&self) -> Result<Candle, ProtocolError> {
        let timestamp = parse_wire_time(&self.time)
            .ok_or_else(|| ProtocolError::InvalidTimestamp(self.time.clone()))?;
        Ok(Candle::new(
            timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume.unwrap_or(0.0),
        ))
    }

    /// Build a wire bar from a core candle.
    pub fn from_candle(candle: &Candle) -> Self {
        let time = DateTime::<Utc>::from_timestamp(candle.timestamp as i64, 0)
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default();
        Self {
            time,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: Some(candle.volume),
        }
    }
}

/// The server accepts a few timestamp shapes: RFC 3339, a bare
/// date-time, or a bare date.
fn parse_wire_time(value: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp() as f64);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64);
    }
    None
}

/// A server stream message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub symbol: String,
    pub timeframe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar: Option<WireBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StreamMessage {
    /// Decode a stream message from JSON.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the message as JSON.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
