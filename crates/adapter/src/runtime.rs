//! Adapter runtime integration.
//!
//! Bridges the synchronous puzzle loop with the async TCP server. The loop
//! owns the [`HexPuzzle`]; server tasks only ever see [`InboundCommand`]s and
//! [`OutboundMessage`]s.

use log::{info, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::engine::{HexPuzzle, Move};
use crate::protocol::{
    create_error, create_ignored, create_moved, create_observation, ErrorCode,
};
use crate::server::{run_server, ServerConfig};

/// Command delivered to the puzzle loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub command: ClientCommand,
}

/// Command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Move(Move),
    Load(String),
    Reset,
    Observe,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    Broadcast { line: String },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    pub fn start_from_env() -> anyhow::Result<Self> {
        Self::start(ServerConfig::from_env())
    }

    pub fn start(config: ServerConfig) -> anyhow::Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();

        let rt = Runtime::new()?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, None).await {
                warn!("adapter server stopped: {}", e);
            }
        });

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
        })
    }

    /// Block until the next command arrives; None once the server has stopped.
    pub fn recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.blocking_recv()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    /// Serve commands against `puzzle` until the server stops
    pub fn run(&mut self, puzzle: &mut HexPuzzle) {
        while let Some(cmd) = self.recv() {
            for msg in dispatch(puzzle, &cmd) {
                self.send(msg);
            }
        }
    }
}

/// Apply one inbound command to the puzzle and build the replies.
///
/// Moves are answered to the sender only. A successful `load` or `reset`
/// changes the board for everyone, so the new observation is broadcast.
pub fn dispatch(puzzle: &mut HexPuzzle, cmd: &InboundCommand) -> Vec<OutboundMessage> {
    let to_sender = |line: String| OutboundMessage::ToClient {
        client_id: cmd.client_id,
        line,
    };

    match &cmd.command {
        ClientCommand::Move(mv) => match puzzle.apply(*mv) {
            Ok(outcome) => {
                let moved = create_moved(cmd.seq, *mv, puzzle, &outcome);
                vec![to_sender(encode(&moved))]
            }
            Err(rejection) => {
                warn!(
                    "client {} {} {} ignored: {}",
                    cmd.client_id,
                    mv.as_str(),
                    mv.position(),
                    rejection.code()
                );
                vec![to_sender(encode(&create_ignored(cmd.seq, rejection)))]
            }
        },
        ClientCommand::Load(definition) => match HexPuzzle::load(definition) {
            Ok(loaded) => {
                info!("client {} loaded a new puzzle", cmd.client_id);
                *puzzle = loaded;
                vec![OutboundMessage::Broadcast {
                    line: encode(&create_observation(cmd.seq, puzzle)),
                }]
            }
            Err(e) => {
                warn!("client {} sent a bad definition: {}", cmd.client_id, e);
                let error = create_error(
                    cmd.seq,
                    ErrorCode::InvalidDefinition,
                    &format!("{}: {}", e.code(), e),
                );
                vec![to_sender(encode(&error))]
            }
        },
        ClientCommand::Reset => {
            puzzle.reload();
            vec![OutboundMessage::Broadcast {
                line: encode(&create_observation(cmd.seq, puzzle)),
            }]
        }
        ClientCommand::Observe => vec![to_sender(encode(&create_observation(cmd.seq, puzzle)))],
    }
}

fn encode<T: serde::Serialize>(msg: &T) -> String {
    // Message types only hold strings, integers and bools.
    serde_json::to_string(msg).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn command(seq: u64, command: ClientCommand) -> InboundCommand {
        InboundCommand {
            client_id: 1,
            seq,
            command,
        }
    }

    fn line(msg: &OutboundMessage) -> serde_json::Value {
        let (OutboundMessage::ToClient { line, .. } | OutboundMessage::Broadcast { line }) = msg;
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn move_is_answered_to_sender() {
        let mut puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1").unwrap();
        let out = dispatch(
            &mut puzzle,
            &command(2, ClientCommand::Move(Move::Switch(Position::new(0, 1)))),
        );
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], OutboundMessage::ToClient { client_id: 1, .. }));
        let v = line(&out[0]);
        assert_eq!(v["type"], "moved");
        assert_eq!(v["seq"], 2);
        assert_eq!(v["completed"], true);
    }

    #[test]
    fn rejected_move_is_ignored() {
        let mut puzzle = HexPuzzle::load("hex 3x3 2,1,tg,tt,up,1").unwrap();
        let out = dispatch(
            &mut puzzle,
            &command(3, ClientCommand::Move(Move::Rotate(Position::new(2, 1)))),
        );
        let v = line(&out[0]);
        assert_eq!(v["type"], "ignored");
        assert_eq!(v["reason"], "not_interactive");
    }

    #[test]
    fn bad_load_keeps_current_puzzle() {
        let mut puzzle = HexPuzzle::load("hex 2x2 0,0,cn,tt,up,0").unwrap();
        let out = dispatch(&mut puzzle, &command(4, ClientCommand::Load("hex 0x0".into())));
        let v = line(&out[0]);
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "invalid_definition");
        assert_eq!(puzzle.definition(), "hex 2x2 0,0,cn,tt,up,0");
    }

    #[test]
    fn oversized_load_is_refused() {
        let mut puzzle = HexPuzzle::load("hex 2x2 0,0,cn,tt,up,0").unwrap();
        let out = dispatch(
            &mut puzzle,
            &command(4, ClientCommand::Load("hex 4294967296x4294967296".into())),
        );
        let v = line(&out[0]);
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "invalid_definition");
        assert!(v["message"].as_str().unwrap().starts_with("invalid_size"));
        assert_eq!(puzzle.grid().size(), (2, 2));
    }

    #[test]
    fn load_and_reset_broadcast_observation() {
        let mut puzzle = HexPuzzle::load("hex 2x2").unwrap();
        let out = dispatch(
            &mut puzzle,
            &command(5, ClientCommand::Load("hex 3x2 0,0,cn,tt,pw,0".into())),
        );
        assert!(matches!(out[0], OutboundMessage::Broadcast { .. }));
        let v = line(&out[0]);
        assert_eq!(v["type"], "observation");
        assert_eq!(v["rows"], 3);

        puzzle.switch(Position::new(0, 0)).unwrap();
        let out = dispatch(&mut puzzle, &command(6, ClientCommand::Reset));
        assert!(matches!(out[0], OutboundMessage::Broadcast { .. }));
        assert_eq!(puzzle.grid()[Position::new(0, 0)].power(), 1);
    }
}
