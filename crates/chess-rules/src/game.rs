//! Game state and the rule engine that advances it.
//!
//! [`Game`] owns a [`GameState`] and is the only thing that mutates it. A
//! move request goes through the same steps every time:
//!
//! 1. the game must still be running,
//! 2. the origin must hold a piece of the active color (unless turns are free),
//! 3. the destination must be one the piece can reach,
//! 4. castling and promotion are resolved and the board is updated,
//! 5. the turn passes and the position is classified for the next side.
//!
//! Every refusal comes back as [`MoveOutcome::Rejected`] and leaves the state
//! exactly as it was.

use crate::rules::{self, AppliedMove, GameResult, PlanError};
use crate::{Board, EngineConfig, EngineError, TurnOrder};
use chess_core::{Color, MoveRequest, PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Everything needed to resume a game: the board, whose turn it is and the
/// result once the game has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub active_color: Color,
    pub result: Option<GameResult>,
}

impl GameState {
    /// Creates a running game state.
    pub fn new(board: Board, active_color: Color) -> Self {
        GameState {
            board,
            active_color,
            result: None,
        }
    }

    /// Returns true once a result has been set.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::standard(), Color::White)
    }
}

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("no piece on the origin cell")]
    EmptyOrigin,
    #[error("the piece belongs to the side not on move")]
    NotYourTurn,
    #[error("the piece cannot reach that cell")]
    UnreachableDestination,
    #[error("a pawn cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    #[error("the game is over")]
    GameOver,
}

/// The answer to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played.
    Applied(AppliedMove),
    /// The move was refused; nothing changed.
    Rejected(RejectReason),
    /// The pawn move is valid but needs a promotion kind. Nothing changed;
    /// repeat the request with one of [`PieceKind::PROMOTIONS`].
    PromotionRequired { from: Position, to: Position },
}

impl MoveOutcome {
    /// Returns true if the move was played.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    /// Returns the move record if the move was played.
    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Applied(applied) => Some(applied),
            _ => None,
        }
    }

    /// Returns the reason if the move was refused.
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// A game in progress.
///
/// The game keeps the board it started from and the record of every applied
/// move, so a client can replay or display the history.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    config: EngineConfig,
    start: Board,
    history: Vec<AppliedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard layout with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a game from the standard layout.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_board(Board::standard(), config)
    }

    /// Creates a game from an arbitrary board.
    ///
    /// `config.starting_color` moves first. The position is classified right
    /// away, so a board with no move for that side starts out finished.
    pub fn from_board(board: Board, config: EngineConfig) -> Self {
        let mut game = Game {
            state: GameState::new(board.clone(), config.starting_color),
            config,
            start: board,
            history: Vec::new(),
        };
        game.check_game_end();
        game
    }

    /// Creates a game from the text layout format.
    pub fn from_layout(text: &str, config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::from_board(Board::from_layout(text)?, config))
    }

    /// Resumes a game from a snapshot.
    ///
    /// A stored result is kept as is. The move history starts empty.
    pub fn restore(state: GameState, config: EngineConfig) -> Self {
        let mut game = Game {
            start: state.board.clone(),
            state,
            config,
            history: Vec::new(),
        };
        if game.state.result.is_none() {
            game.check_game_end();
        }
        game
    }

    /// Returns a copy of the full state, suitable for serializing.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Returns the board the game started from.
    pub fn start_board(&self) -> &Board {
        &self.start
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the color expected to move next.
    pub fn active_color(&self) -> Color {
        self.state.active_color
    }

    /// Returns the result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.state.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// Returns every applied move, oldest first.
    pub fn history(&self) -> &[AppliedMove] {
        &self.history
    }

    /// Returns the number of applied moves.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the active color is in check.
    pub fn is_in_check(&self) -> bool {
        rules::is_in_check(&self.state.board, self.state.active_color)
    }

    /// Returns the cells the piece on `from` may move to.
    ///
    /// Empty when `from` is empty or off the board. Turn order is not
    /// considered; castling tokens show up as the rook's cell.
    pub fn legal_destinations(&self, from: Position) -> BTreeSet<Position> {
        rules::legal_destinations(&self.state.board, from, self.config.self_check)
            .as_slice()
            .iter()
            .copied()
            .collect()
    }

    /// Returns every move the active color can make, one request per
    /// promotion kind where a promotion is due.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        if self.is_game_over() {
            return Vec::new();
        }
        let board = &self.state.board;
        let mut moves = Vec::new();
        for (from, piece) in board.pieces_of(self.state.active_color) {
            for &to in &rules::legal_destinations(board, from, self.config.self_check) {
                let request = MoveRequest::new(from, to);
                if piece.kind == PieceKind::Pawn && to.rank == piece.color.promotion_rank() {
                    moves.extend(PieceKind::PROMOTIONS.iter().map(|&kind| request.promoting_to(kind)));
                } else {
                    moves.push(request);
                }
            }
        }
        moves
    }

    /// Submits a [`MoveRequest`].
    pub fn submit(&mut self, request: MoveRequest) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(request.from, request.to, request.promotion)
    }

    /// Validates and, if legal, plays the move `from -> to`.
    ///
    /// `promotion` is only read when a pawn reaches its last rank; if it is
    /// missing then, the answer is [`MoveOutcome::PromotionRequired`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OffBoard`] if either position is off the board.
    pub fn attempt_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, EngineError> {
        for pos in [from, to] {
            if !pos.is_on_board() {
                return Err(EngineError::OffBoard(pos));
            }
        }

        if self.state.result.is_some() {
            return Ok(reject(from, to, RejectReason::GameOver));
        }

        let Some(piece) = self.state.board.piece_at(from) else {
            return Ok(reject(from, to, RejectReason::EmptyOrigin));
        };

        if self.config.turn_order == TurnOrder::Alternate && piece.color != self.state.active_color {
            return Ok(reject(from, to, RejectReason::NotYourTurn));
        }

        if !rules::legal_destinations(&self.state.board, from, self.config.self_check).contains(to) {
            return Ok(reject(from, to, RejectReason::UnreachableDestination));
        }

        let plan = match rules::plan(&self.state.board, from, to, piece, promotion) {
            Ok(plan) => plan,
            Err(PlanError::PromotionRequired) => {
                trace!(%from, %to, "promotion kind required");
                return Ok(MoveOutcome::PromotionRequired { from, to });
            }
            Err(PlanError::InvalidPromotion(kind)) => {
                return Ok(reject(from, to, RejectReason::InvalidPromotion(kind)));
            }
            Err(PlanError::BrokenCastle) => {
                return Ok(reject(from, to, RejectReason::UnreachableDestination));
            }
        };

        let applied = rules::execute(&mut self.state.board, from, to, piece, plan);
        debug!(
            %from,
            %to,
            piece = %applied.piece,
            kind = ?applied.kind,
            captured = ?applied.captured,
            "move applied"
        );

        // Under free turns the side that did not just move is up next
        self.state.active_color = piece.color.opposite();
        self.history.push(applied);
        self.check_game_end();

        Ok(MoveOutcome::Applied(applied))
    }

    /// Classifies the position for the active color and records the result.
    fn check_game_end(&mut self) {
        let result = rules::evaluate(
            &self.state.board,
            self.state.active_color,
            self.config.self_check,
        );
        if let Some(result) = result {
            info!(%result, ply = self.history.len(), "game over");
            self.state.result = Some(result);
        }
    }
}

fn reject(from: Position, to: Position, reason: RejectReason) -> MoveOutcome {
    trace!(%from, %to, %reason, "move rejected");
    MoveOutcome::Rejected(reason)
}
