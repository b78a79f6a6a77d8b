use crate::{board::Board, types::*};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
///
/// Each ply plays on a fresh board copy, the same way a game does: the
/// mover's stale en-passant square is cleared before the move executes.
pub fn perft(board: &Board, side: Player, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut buf = Vec::with_capacity(64);
    for pos in board.piece_positions_for(side) {
        if let Some(piece) = board[pos] {
            piece.pseudo_moves_into(pos, board, &mut buf);
        }
    }

    let mut nodes = 0u64;
    for mv in buf.iter().filter(|mv| mv.is_legal(board)) {
        if depth == 1 {
            nodes += 1;
            continue;
        }
        let mut next = board.copy();
        next.set_pawn_skip_position(side, None);
        mv.execute(&mut next);
        nodes += perft(&next, side.opponent(), depth - 1);
    }
    nodes
}
