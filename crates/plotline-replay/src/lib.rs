//! Replay playback and paper-trading support.
//!
//! This crate covers the collaborators around the chart engine:
//! - `protocol` - the replay WebSocket wire types (client commands and
//!   server stream messages)
//! - `playback` - a synchronous, host-ticked playback manager for stepping
//!   through historical bars at a controllable speed
//! - `position` - a paper-trading position simulator with unrealized P&L,
//!   stop-loss and take-profit handling

pub mod playback;
pub mod position;
pub mod protocol;

pub use playback::{PlaybackManager, PlaybackState};
pub use position::{ExitReason, Position, PositionBook, PositionSide};
pub use protocol::{MessageKind, ProtocolError, ReplayCommand, StreamMessage, WireBar};
