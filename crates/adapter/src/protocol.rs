//! Protocol module - JSON message types for the puzzle adapter
//!
//! Line-delimited JSON. Every message carries `type`, `seq` (sender sequence
//! number) and, when sent by the server, `ts` (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::engine::{HexPuzzle, Move, MoveOutcome, Rejection, TargetStatus};
use crate::types::Position;

/// Protocol version announced in `welcome`; clients must share the major version
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Puzzle Messages ==============

/// Client hello message (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    pub seq: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Rotate,
    Switch,
}

impl<'de> Deserialize<'de> for MoveAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("rotate") {
            Ok(Self::Rotate)
        } else if s.eq_ignore_ascii_case("switch") {
            Ok(Self::Switch)
        } else {
            Err(serde::de::Error::custom("unknown action"))
        }
    }
}

impl Serialize for MoveAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MoveAction::Rotate => serializer.serialize_str("rotate"),
            MoveAction::Switch => serializer.serialize_str("switch"),
        }
    }
}

/// Rotate or switch one cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    pub action: MoveAction,
    pub row: usize,
    pub col: usize,
}

impl CommandMessage {
    pub fn to_move(&self) -> Move {
        let pos = Position::new(self.row, self.col);
        match self.action {
            MoveAction::Rotate => Move::Rotate(pos),
            MoveAction::Switch => Move::Switch(pos),
        }
    }
}

/// Replace the running puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadMessage {
    pub seq: u64,
    pub definition: String,
}

/// Messages that carry nothing but a sequence number (`reset`, `observe`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeqOnly {
    pub seq: u64,
}

// ============== Puzzle -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "invalid_definition")]
    InvalidDefinition,
    #[serde(rename = "backpressure")]
    Backpressure,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub game_id: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// One cell as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub kind: String,
    pub direction: String,
    pub power: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetView {
    pub row: usize,
    pub col: usize,
    pub power: i32,
    pub target: i32,
    pub satisfied: bool,
}

impl From<TargetStatus> for TargetView {
    fn from(value: TargetStatus) -> Self {
        Self {
            row: value.position.row,
            col: value.position.col,
            power: value.power,
            target: value.target_power,
            satisfied: value.satisfied,
        }
    }
}

/// Full puzzle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,
    pub targets: Vec<TargetView>,
    pub completed: bool,
}

/// Result of an accepted move: only the cells whose power changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovedMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub action: MoveAction,
    pub row: usize,
    pub col: usize,
    pub changed: Vec<CellView>,
    pub targets: Vec<TargetView>,
    pub completed: bool,
}

/// A move that left the puzzle untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoredMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub reason: String,
    pub message: String,
}

// ============== Parsing ==============

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Load(LoadMessage),
    Reset(SeqOnly),
    Observe(SeqOnly),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse one inbound line
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "load")]
        Load(LoadMessage),
        #[serde(rename = "reset")]
        Reset(SeqOnly),
        #[serde(rename = "observe")]
        Observe(SeqOnly),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Load(m)) => Ok(ParsedMessage::Load(m)),
        Ok(InboundMessage::Reset(m)) => Ok(ParsedMessage::Reset(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(e) => {
            // An unknown type is reported to the client, not treated as garbage.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let probe = serde_json::from_str::<TypeOnly>(json)?;
            match probe.msg_type {
                Some("hello" | "command" | "load" | "reset" | "observe") | None => Err(e),
                Some(_) => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: probe.seq.unwrap_or(0),
                })),
            }
        }
    }
}

// ============== Utility Functions ==============

pub fn create_welcome(seq: u64, client_id: u64) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: "welcome".to_string(),
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        game_id: "hex-power".to_string(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: "error".to_string(),
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

pub fn create_ignored(seq: u64, rejection: Rejection) -> IgnoredMessage {
    IgnoredMessage {
        msg_type: "ignored".to_string(),
        seq,
        ts: current_timestamp_ms(),
        reason: rejection.code().to_string(),
        message: rejection.message().to_string(),
    }
}

fn cell_view(puzzle: &HexPuzzle, pos: Position) -> CellView {
    let cell = &puzzle.grid()[pos];
    CellView {
        row: pos.row,
        col: pos.col,
        kind: cell.kind().as_code().to_string(),
        direction: cell.direction().as_code().to_string(),
        power: cell.power(),
    }
}

pub fn create_observation(seq: u64, puzzle: &HexPuzzle) -> ObservationMessage {
    let grid = puzzle.grid();
    ObservationMessage {
        msg_type: "observation".to_string(),
        seq,
        ts: current_timestamp_ms(),
        rows: grid.rows(),
        cols: grid.cols(),
        cells: grid
            .cells()
            .iter()
            .map(|c| cell_view(puzzle, c.position()))
            .collect(),
        targets: puzzle
            .target_statuses()
            .into_iter()
            .map(TargetView::from)
            .collect(),
        completed: puzzle.is_completed(),
    }
}

pub fn create_moved(seq: u64, mv: Move, puzzle: &HexPuzzle, outcome: &MoveOutcome) -> MovedMessage {
    let pos = mv.position();
    MovedMessage {
        msg_type: "moved".to_string(),
        seq,
        ts: current_timestamp_ms(),
        action: match mv {
            Move::Rotate(_) => MoveAction::Rotate,
            Move::Switch(_) => MoveAction::Switch,
        },
        row: pos.row,
        col: pos.col,
        changed: outcome
            .changed
            .iter()
            .map(|&p| cell_view(puzzle, p))
            .collect(),
        targets: outcome
            .targets
            .iter()
            .copied()
            .map(TargetView::from)
            .collect(),
        completed: outcome.completed,
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello() {
        let json = r#"{"type":"hello","seq":1,"client":{"name":"board-ui","version":"0.3.0"},"protocol_version":"1.0.0"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Hello(msg) => {
                assert_eq!(msg.seq, 1);
                assert_eq!(msg.client.name, "board-ui");
                assert_eq!(msg.protocol_version, "1.0.0");
            }
            other => panic!("Expected Hello message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_case_insensitive_action() {
        let json = r#"{"type":"command","seq":2,"action":"Rotate","row":3,"col":1}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Command(msg) => {
                assert_eq!(msg.action, MoveAction::Rotate);
                assert_eq!(msg.to_move(), Move::Rotate(Position::new(3, 1)));
            }
            other => panic!("Expected Command message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_load_and_seq_only() {
        let json = r#"{"type":"load","seq":4,"definition":"hex 2x2"}"#;
        assert!(matches!(
            parse_message(json).unwrap(),
            ParsedMessage::Load(LoadMessage { seq: 4, .. })
        ));
        assert!(matches!(
            parse_message(r#"{"type":"reset","seq":5}"#).unwrap(),
            ParsedMessage::Reset(SeqOnly { seq: 5 })
        ));
        assert!(matches!(
            parse_message(r#"{"type":"observe","seq":6}"#).unwrap(),
            ParsedMessage::Observe(SeqOnly { seq: 6 })
        ));
    }

    #[test]
    fn test_unknown_type_keeps_seq() {
        let parsed = parse_message(r#"{"type":"dance","seq":9}"#).unwrap();
        assert!(matches!(
            parsed,
            ParsedMessage::Unknown(UnknownMessage { seq: 9 })
        ));
    }

    #[test]
    fn test_bad_known_message_is_an_error() {
        assert!(parse_message(r#"{"type":"command","seq":2,"action":"jump","row":0,"col":0}"#).is_err());
        assert!(parse_message("not json").is_err());
    }

    #[test]
    fn test_moved_lists_changed_cells_with_new_power() {
        let mut puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1").unwrap();
        let mv = Move::Switch(Position::new(0, 1));
        let outcome = puzzle.apply(mv).unwrap();
        let moved = create_moved(7, mv, &puzzle, &outcome);

        assert_eq!(moved.msg_type, "moved");
        assert_eq!(moved.changed.len(), 2);
        assert_eq!(moved.changed[0].kind, "dn");
        assert_eq!(moved.changed[0].power, 1);
        assert_eq!((moved.changed[1].row, moved.changed[1].col), (1, 1));
        assert_eq!(moved.changed[1].power, 1);
        assert!(moved.completed);

        let json = serde_json::to_string(&moved).unwrap();
        assert!(json.contains(r#""action":"switch""#));
    }

    #[test]
    fn test_observation_covers_every_cell() {
        let puzzle = HexPuzzle::load("hex 2x3 1,2,tg,tt,up,3").unwrap();
        let obs = create_observation(1, &puzzle);
        assert_eq!(obs.cells.len(), 6);
        assert_eq!(obs.targets.len(), 1);
        assert_eq!(obs.targets[0].target, 3);
        assert!(!obs.completed);
    }

    #[test]
    fn test_create_ignored_uses_rejection_code() {
        let msg = create_ignored(3, Rejection::NotInteractive);
        assert_eq!(msg.reason, "not_interactive");
        assert_eq!(msg.msg_type, "ignored");
    }
}
