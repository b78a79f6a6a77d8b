pub mod board;
pub mod counting;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod perft;
pub mod state_string;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use counting::Counting;
pub use game::*;
pub use moves::*;
pub use notation::*;
pub use perft::perft;
pub use state_string::*;
pub use types::*;

// =============================================================================
// MoveProvider trait: implemented by everything that can pick a move for the
// side to move (random mover, external UCI engine, remote player, ...)
// =============================================================================

/// Something that chooses moves for a game.
///
/// Implementations may block (an external engine process, a network peer);
/// callers that must stay responsive run them on a worker thread.
pub trait MoveProvider: Send {
    /// Pick a move for the side to move in `game`.
    ///
    /// # Returns
    /// `None` when no move could be produced: no legal moves, the collaborator
    /// timed out, or its answer did not match a legal move. Callers treat this
    /// as the side being unable to move.
    fn request_move(&mut self, game: &GameState) -> Option<Move>;

    /// Name shown in logs and game records
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
