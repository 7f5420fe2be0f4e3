//! Session glue between the board engine and a transport
//!
//! A [`Session`] owns the [`Field`] of one match and decides what happens with
//! moves made locally or received from elsewhere. It never touches sockets:
//! every operation returns the [`Outgoing`] messages the transport should
//! deliver, and incoming messages are handed in by the transport.
//!
//! # Modes
//!
//! - `Local` - hot-seat play, the point of view follows the player to move
//! - `Host` - authoritative board, validates turn order of client messages
//! - `HostHybrid` - host that also plays in seat 0
//! - `Client` - forwards own moves to the host and mirrors its broadcasts
//!
//! # Threading
//!
//! The session itself is single threaded. Connections accepted on other
//! threads go through the [`JoinQueue`] and are seated by
//! [`Session::accept_queued_players`].

mod error;
pub mod events;
pub mod queue;

pub use error::{SessionError, SessionResult};
pub use events::{Event, EventKind};
pub use queue::{JoinQueue, JoinRequest};

use std::sync::Arc;

use ring_engine::api::{advance_turn, apply_move, legal_destinations, promote};
use ring_engine::board::rank_of;
use ring_engine::constants::PROMOTION_RANK;
use ring_engine::{EngineError, Field, Figure, MoveKind, MoveTarget, PlayerIndex, TileId, TurnReport};
use shared::{BoardRecord, Message, PlayerName, ANY_SLOT};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Host,
    Client,
    HostHybrid,
    /// Rejected by the host or shut down
    Closed,
}

impl Mode {
    pub fn is_host(self) -> bool {
        matches!(self, Mode::Host | Mode::HostHybrid)
    }
}

/// A player slot at the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    /// Transport handle of a remote player
    pub connection: Option<u64>,
    /// Seat used by a hybrid host
    pub is_host: bool,
}

impl Seat {
    pub fn is_taken(&self) -> bool {
        self.connection.is_some() || self.is_host
    }
}

/// Something the transport should deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Client → Host
    ToServer(Message),
    /// Host → a connection that has no seat (yet)
    ToConnection { connection: u64, message: Message },
    /// Host → one seated player
    ToPlayer { player: PlayerIndex, message: Message },
    /// Host → one seated player, the full board
    Board { player: PlayerIndex, record: BoardRecord },
    /// Host → every seated player
    Broadcast(Message),
}

pub struct Session {
    mode: Mode,
    field: Option<Field>,
    seats: Vec<Seat>,
    log: Vec<Event>,
    queue: Arc<JoinQueue>,
    own_name: String,
}

impl Session {
    fn with_field(mode: Mode, field: Option<Field>) -> Session {
        let seats = field
            .as_ref()
            .map(|field| vec![Seat::default(); field.num_players as usize])
            .unwrap_or_default();

        Session {
            mode,
            field,
            seats,
            log: Vec::new(),
            queue: Arc::new(JoinQueue::default()),
            own_name: String::new(),
        }
    }

    /// Hot-seat match in the starting position
    pub fn local(num_players: u32) -> SessionResult<Session> {
        Ok(Self::local_from(Field::new(num_players)?))
    }

    /// Hot-seat match continuing from a prepared field
    pub fn local_from(field: Field) -> Session {
        info!("local session for {} players", field.num_players);
        Self::with_field(Mode::Local, Some(field))
    }

    pub fn host(num_players: u32) -> SessionResult<Session> {
        info!("hosting a match for {} players", num_players);
        Ok(Self::with_field(Mode::Host, Some(Field::new(num_players)?)))
    }

    /// Host that also plays in seat 0 under `name`
    pub fn host_hybrid(num_players: u32, name: &str) -> SessionResult<Session> {
        PlayerName::new(name)?;

        let mut session = Self::with_field(Mode::HostHybrid, Some(Field::new(num_players)?));
        session.seats[0] = Seat {
            name: name.to_string(),
            connection: None,
            is_host: true,
        };
        session.own_name = name.to_string();
        info!("hosting a match for {} players, playing as {}", num_players, name);
        Ok(session)
    }

    /// Client without a board; returns the join request to send to the host
    pub fn client(name: &str, slot: Option<PlayerIndex>) -> SessionResult<(Session, Outgoing)> {
        let request = Message::join(0, slot.unwrap_or(ANY_SLOT), name)?;

        let mut session = Self::with_field(Mode::Client, None);
        session.own_name = name.to_string();
        Ok((session, Outgoing::ToServer(request)))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// Queue handle for threads accepting connections
    pub fn join_queue(&self) -> Arc<JoinQueue> {
        Arc::clone(&self.queue)
    }

    fn board(&self) -> SessionResult<&Field> {
        self.field.as_ref().ok_or(SessionError::NoBoard)
    }

    fn board_mut(&mut self) -> SessionResult<&mut Field> {
        self.field.as_mut().ok_or(SessionError::NoBoard)
    }

    fn require(&self, allowed: bool) -> SessionResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(SessionError::WrongMode { mode: self.mode })
        }
    }

    /// Legal destinations of the figure on `tile`
    pub fn legal_moves(&self, tile: TileId) -> SessionResult<Vec<MoveTarget>> {
        Ok(legal_destinations(self.board()?, tile)?)
    }

    /// Move a figure of the player to move, checking ownership and legality
    ///
    /// The move kind is taken from the legal destinations; see
    /// [`Session::move_figure`] for what happens next.
    pub fn play(&mut self, from: TileId, to: TileId) -> SessionResult<Option<Outgoing>> {
        let field = self.board()?;
        let origin = *field.tile(from)?;
        if origin.is_empty() {
            return Err(EngineError::NoFigureAtTile { tile: from }.into());
        }
        if origin.owner() != field.current_player {
            return Err(EngineError::NotYourTurn {
                player: origin.owner(),
                current: field.current_player,
            }
            .into());
        }

        let kind = legal_destinations(field, from)?
            .into_iter()
            .find(|target| target.tile == to)
            .map(|target| target.kind)
            .ok_or(EngineError::IllegalMove { from, to })?;

        self.move_figure(from, to, kind)
    }

    /// Move a figure for the player to move, without legality checks
    ///
    /// A client only forwards the move to the host. Everywhere else the move is
    /// applied and logged, and the turn passes on unless a pawn just reached
    /// rank 0 and waits for promotion. Hosts broadcast the move together with
    /// the next player.
    pub fn move_figure(&mut self, from: TileId, to: TileId, kind: MoveKind) -> SessionResult<Option<Outgoing>> {
        self.require(self.mode != Mode::Closed)?;
        let player = self.board()?.current_player;

        if self.mode == Mode::Client {
            return Ok(Some(Outgoing::ToServer(Message::movement(player, from, to, kind))));
        }

        self.apply_and_log(player, from, to, kind)?;
        if !self.promotion_pending(to) {
            self.switch_to_next_player()?;
        }

        if self.mode.is_host() {
            let next = self.board()?.current_player;
            Ok(Some(Outgoing::Broadcast(
                Message::movement(player, from, to, kind).with_next_player(next),
            )))
        } else {
            Ok(None)
        }
    }

    /// Promote the pawn on `tile` for the player to move, then pass the turn
    pub fn promote_figure(&mut self, tile: TileId, figure: Figure) -> SessionResult<Option<Outgoing>> {
        self.require(self.mode != Mode::Closed)?;
        let player = self.board()?.current_player;

        if self.mode == Mode::Client {
            return Ok(Some(Outgoing::ToServer(Message::promotion(player, tile, figure))));
        }

        promote(self.board_mut()?, tile, figure)?;
        self.log.push(Event::promotion(player, tile, figure));
        self.switch_to_next_player()?;

        if self.mode.is_host() {
            let next = self.board()?.current_player;
            Ok(Some(Outgoing::Broadcast(
                Message::promotion(player, tile, figure).with_next_player(next),
            )))
        } else {
            Ok(None)
        }
    }

    /// Pass the turn on and log check and checkmate results
    ///
    /// Clients follow the `next_player` announced by the host instead.
    pub fn switch_to_next_player(&mut self) -> SessionResult<TurnReport> {
        self.require(!matches!(self.mode, Mode::Client | Mode::Closed))?;
        let local = self.mode == Mode::Local;
        let field = self.board_mut()?;
        let report = advance_turn(field);
        if local {
            field.point_of_view = report.current_player;
        }

        for player in &report.eliminated {
            self.log.push(Event::checkmate(*player));
        }
        if report.in_check {
            self.log.push(Event::check(report.current_player));
        }
        Ok(report)
    }

    /// Give up for `player`
    ///
    /// The player is flagged like a checkmated one. If it was their turn, the
    /// turn passes on and the report of that rotation is returned. Only hot-seat
    /// play can surrender: the wire protocol has no message to tell the others.
    pub fn surrender(&mut self, player: PlayerIndex) -> SessionResult<Option<TurnReport>> {
        self.require(self.mode == Mode::Local)?;
        let field = self.board_mut()?;
        field.check_player(player)?;
        if field.players[player as usize].is_checkmate {
            return Ok(None);
        }

        field.players[player as usize].is_checkmate = true;
        let was_current = field.current_player == player;
        self.log.push(Event::surrender(player));
        info!("player {} surrendered", player);

        if was_current {
            Ok(Some(self.switch_to_next_player()?))
        } else {
            Ok(None)
        }
    }

    /// Host side handling of a message from the client in seat `sender`
    ///
    /// Moves and promotions from anyone but the player to move are dropped.
    pub fn handle_client_message(&mut self, sender: PlayerIndex, msg: Message) -> SessionResult<Vec<Outgoing>> {
        self.require(self.mode.is_host())?;
        let current = self.board()?.current_player;

        match msg {
            Message::Move { from, to, kind, .. } => {
                if sender != current {
                    warn!("ignoring move from player {} on player {}'s turn", sender, current);
                    return Ok(Vec::new());
                }

                self.apply_and_log(sender, from, to, kind)?;
                if !self.promotion_pending(to) {
                    self.switch_to_next_player()?;
                }
                let next = self.board()?.current_player;
                Ok(vec![Outgoing::Broadcast(msg.with_next_player(next))])
            }
            Message::Promotion { tile, figure, .. } => {
                if sender != current {
                    warn!("ignoring promotion from player {} on player {}'s turn", sender, current);
                    return Ok(Vec::new());
                }

                if let Err(e) = promote(self.board_mut()?, tile, figure) {
                    warn!("ignoring promotion from player {}: {}", sender, e);
                    return Ok(Vec::new());
                }
                self.log.push(Event::promotion(sender, tile, figure));
                self.switch_to_next_player()?;
                let next = self.board()?.current_player;
                Ok(vec![Outgoing::Broadcast(msg.with_next_player(next))])
            }
            Message::None | Message::Join { .. } | Message::Accept { .. } | Message::Reject => {
                debug!("ignoring {:?} from player {}", msg, sender);
                Ok(Vec::new())
            }
        }
    }

    /// Client side handling of a message from the host
    pub fn handle_server_message(&mut self, msg: Message) -> SessionResult<()> {
        self.require(self.mode == Mode::Client)?;

        match msg {
            Message::None => {}
            Message::Join { player, name, .. } => match self.seats.get_mut(player as usize) {
                Some(seat) => {
                    seat.name = name.to_string();
                    info!("{} sits in seat {}", name, player);
                }
                None => warn!("join announcement for unknown seat {}", player),
            },
            Message::Accept { player, num_players } => {
                let mut field = Field::new(num_players)?;
                field.set_point_of_view(player)?;

                self.seats = vec![Seat::default(); num_players as usize];
                self.seats[player as usize].name = self.own_name.clone();
                self.field = Some(field);
                info!("joined as player {} of {}, waiting for the board", player, num_players);
            }
            Message::Reject => {
                info!("host rejected the join request");
                self.close();
            }
            Message::Move {
                player,
                from,
                to,
                kind,
                next_player,
            } => {
                self.board()?.check_player(next_player)?;
                self.apply_and_log(player, from, to, kind)?;
                self.board_mut()?.current_player = next_player;
            }
            Message::Promotion {
                player,
                tile,
                figure,
                next_player,
            } => {
                let field = self.board_mut()?;
                field.check_player(next_player)?;
                promote(field, tile, figure)?;
                field.current_player = next_player;
                self.log.push(Event::promotion(player, tile, figure));
            }
        }
        Ok(())
    }

    /// Adopt the board sent by the host after `Accept`
    pub fn receive_board(&mut self, record: &BoardRecord) -> SessionResult<()> {
        self.require(self.mode == Mode::Client)?;
        record.apply_to(self.board_mut()?)?;
        info!("received board from host, ready to play");
        Ok(())
    }

    /// Seat everybody waiting in the join queue
    ///
    /// Accepted players get `Accept`, the board and the names of everybody
    /// already seated; the others learn about the newcomer. Requests for a
    /// missing or taken seat are answered with `Reject`.
    pub fn accept_queued_players(&mut self) -> SessionResult<Vec<Outgoing>> {
        self.require(self.mode.is_host())?;

        let mut outgoing = Vec::new();
        for request in self.queue.drain() {
            let index = match self.resolve_slot(request.slot) {
                Ok(index) => index,
                Err(e) => {
                    warn!("rejecting {}: {}", request.name, e);
                    outgoing.push(Outgoing::ToConnection {
                        connection: request.connection,
                        message: Message::Reject,
                    });
                    continue;
                }
            };

            self.seats[index as usize] = Seat {
                name: request.name.to_string(),
                connection: Some(request.connection),
                is_host: false,
            };

            let field = self.board()?;
            outgoing.push(Outgoing::ToConnection {
                connection: request.connection,
                message: Message::accept(index, field.num_players),
            });
            outgoing.push(Outgoing::Board {
                player: index,
                record: BoardRecord::from_field(field),
            });

            for (other, seat) in self.seats.iter().enumerate() {
                if other as PlayerIndex == index || !seat.is_taken() {
                    continue;
                }
                outgoing.push(Outgoing::ToPlayer {
                    player: index,
                    message: Message::join(0, other as PlayerIndex, &seat.name)?,
                });
            }

            outgoing.push(Outgoing::Broadcast(Message::join(0, index, &request.name.to_string())?));
            info!("accepted {} as player {}", request.name, index);
        }

        Ok(outgoing)
    }

    fn resolve_slot(&self, requested: PlayerIndex) -> SessionResult<PlayerIndex> {
        let num_players = self.seats.len() as u32;
        let slot = if requested == ANY_SLOT {
            self.seats
                .iter()
                .position(|seat| !seat.is_taken())
                .map(|free| free as PlayerIndex)
                .unwrap_or(ANY_SLOT)
        } else {
            requested
        };

        if slot >= num_players {
            return Err(SessionError::SlotOutOfRange { slot, num_players });
        }
        if self.seats[slot as usize].is_taken() {
            return Err(SessionError::SlotTaken { slot });
        }
        Ok(slot)
    }

    /// Free the seat of a player whose connection went away
    pub fn disconnect_player(&mut self, player: PlayerIndex) -> SessionResult<()> {
        self.require(self.mode.is_host())?;
        if let Some(seat) = self.seats.get_mut(player as usize) {
            if seat.connection.take().is_some() {
                info!("player {} ({}) disconnected", player, seat.name);
            }
        }
        Ok(())
    }

    /// Shut the session down; the board stays readable
    pub fn close(&mut self) {
        self.queue.drain();
        self.seats.clear();
        self.mode = Mode::Closed;
    }

    fn apply_and_log(&mut self, player: PlayerIndex, from: TileId, to: TileId, kind: MoveKind) -> SessionResult<()> {
        apply_move(self.board_mut()?, kind, from, to)?;
        if let Some(event) = Event::movement(player, from, to, kind) {
            self.log.push(event);
        }
        Ok(())
    }

    /// Whether the pawn on `to` waits for a promotion before the turn can pass
    pub fn promotion_pending(&self, to: TileId) -> bool {
        self.field.as_ref().is_some_and(|field| {
            field.is_valid_tile(to)
                && field.tiles[to as usize].figure == Figure::Pawn
                && rank_of(to) == PROMOTION_RANK
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_engine::board::tile_id;

    fn request(connection: u64, name: &str, slot: PlayerIndex) -> JoinRequest {
        JoinRequest {
            connection,
            name: PlayerName::new(name).unwrap(),
            slot,
        }
    }

    #[test]
    fn test_mode_is_host() {
        assert!(Mode::Host.is_host());
        assert!(Mode::HostHybrid.is_host());
        assert!(!Mode::Local.is_host());
        assert!(!Mode::Client.is_host());
        assert!(!Mode::Closed.is_host());
    }

    #[test]
    fn test_resolve_slot() {
        let mut session = Session::host_hybrid(3, "Hal").unwrap();
        assert_eq!(session.resolve_slot(ANY_SLOT).unwrap(), 1);
        assert_eq!(session.resolve_slot(2).unwrap(), 2);
        assert!(matches!(session.resolve_slot(0), Err(SessionError::SlotTaken { slot: 0 })));
        assert!(matches!(
            session.resolve_slot(3),
            Err(SessionError::SlotOutOfRange { slot: 3, num_players: 3 })
        ));

        session.seats[1].connection = Some(7);
        session.seats[2].connection = Some(8);
        assert!(matches!(
            session.resolve_slot(ANY_SLOT),
            Err(SessionError::SlotOutOfRange { slot: ANY_SLOT, .. })
        ));
    }

    #[test]
    fn test_local_play_passes_turn_and_view() {
        let mut session = Session::local(2).unwrap();
        let out = session.play(tile_id(4, 1, 0), tile_id(4, 3, 0)).unwrap();
        assert_eq!(out, None);

        let field = session.field().unwrap();
        assert_eq!(field.current_player, 1);
        assert_eq!(field.point_of_view, 1);
        assert_eq!(session.events().len(), 1);
        assert_eq!(session.events()[0].kind, EventKind::Move);
    }

    #[test]
    fn test_play_checks_owner_and_legality() {
        let mut session = Session::local(2).unwrap();
        assert!(matches!(
            session.play(tile_id(4, 1, 1), tile_id(4, 2, 1)),
            Err(SessionError::Engine(EngineError::NotYourTurn { player: 1, current: 0 }))
        ));
        assert!(matches!(
            session.play(tile_id(4, 2, 0), tile_id(4, 3, 0)),
            Err(SessionError::Engine(EngineError::NoFigureAtTile { .. }))
        ));
        assert!(matches!(
            session.play(tile_id(0, 0, 0), tile_id(0, 2, 0)),
            Err(SessionError::Engine(EngineError::IllegalMove { .. }))
        ));
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_wrong_mode() {
        let mut local = Session::local(2).unwrap();
        assert!(matches!(
            local.handle_client_message(1, Message::Reject),
            Err(SessionError::WrongMode { mode: Mode::Local })
        ));
        assert!(matches!(
            local.handle_server_message(Message::Reject),
            Err(SessionError::WrongMode { mode: Mode::Local })
        ));
        assert!(local.accept_queued_players().is_err());

        let (mut client, _) = Session::client("Bea", None).unwrap();
        assert!(matches!(
            client.play(tile_id(4, 1, 0), tile_id(4, 2, 0)),
            Err(SessionError::NoBoard)
        ));
    }

    #[test]
    fn test_surrender_only_in_local_play() {
        let (mut client, _) = Session::client("Bea", None).unwrap();
        client.handle_server_message(Message::accept(1, 2)).unwrap();
        assert!(matches!(
            client.surrender(1),
            Err(SessionError::WrongMode { mode: Mode::Client })
        ));
        assert!(matches!(
            client.switch_to_next_player(),
            Err(SessionError::WrongMode { mode: Mode::Client })
        ));
        let field = client.field().unwrap();
        assert!(!field.players[1].is_checkmate);
        assert_eq!(field.current_player, 0);
        assert!(client.events().is_empty());

        let mut host = Session::host(2).unwrap();
        assert!(matches!(host.surrender(0), Err(SessionError::WrongMode { mode: Mode::Host })));

        client.close();
        assert!(matches!(
            client.surrender(1),
            Err(SessionError::WrongMode { mode: Mode::Closed })
        ));
    }

    #[test]
    fn test_disconnect_frees_seat() {
        let mut host = Session::host(2).unwrap();
        host.join_queue().push(request(11, "Ann", 1));
        host.accept_queued_players().unwrap();
        assert!(host.seats()[1].is_taken());

        host.disconnect_player(1).unwrap();
        assert!(!host.seats()[1].is_taken());
        assert_eq!(host.seats()[1].name, "Ann");
    }
}
