//! Rule scenarios checked through the public game API.

use chess_core::{
    Board, CastleSide, GameState, Move, MoveKind, Orientation, Piece, PieceKind, Player, Position,
    StateString,
};

fn at(row: i8, column: i8) -> Position {
    Position::new(row, column)
}

// =============================================================================
// En Passant
// =============================================================================

#[test]
fn test_en_passant_from_either_side() {
    for column in [3, 5] {
        let mut game = GameState::new(Player::White, Orientation::Standard);

        // Walk a black pawn down to row 4 next to the e-file.
        let black_pawn = at(1, column);
        let white_quiet = [(at(7, 1), at(5, 2)), (at(5, 2), at(7, 1))];
        let black_steps = [(black_pawn, at(3, column)), (at(3, column), at(4, column))];
        for (white, black) in white_quiet.iter().zip(black_steps.iter()) {
            let mv = find(&game, white.0, white.1);
            game.make_move(mv).unwrap();
            let mv = find(&game, black.0, black.1);
            game.make_move(mv).unwrap();
        }

        let double = find(&game, at(6, 4), at(4, 4));
        game.make_move(double).unwrap();
        assert_eq!(
            game.board().pawn_skip_position(Player::White),
            Some(at(5, 4))
        );

        let ep = find(&game, at(4, column), at(5, 4));
        assert_eq!(ep.kind, MoveKind::EnPassant { captured: at(4, 4) });
        game.make_move(ep).unwrap();

        assert!(game.board()[at(4, 4)].is_none(), "captured pawn removed");
        let capturer = game.board()[at(5, 4)].expect("capturing pawn lands on the skip square");
        assert_eq!(capturer.color, Player::Black);
    }
}

#[test]
fn test_en_passant_expires_after_one_turn() {
    let mut game = GameState::from_state_string(
        "rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq -",
        Orientation::Standard,
    )
    .unwrap();
    game.make_move(find(&game, at(6, 4), at(4, 4))).unwrap();
    // Black declines, White and Black make quiet moves
    game.make_move(find(&game, at(0, 1), at(2, 2))).unwrap();
    game.make_move(find(&game, at(7, 6), at(5, 5))).unwrap();

    let pawn_moves = game.legal_moves_for_piece(at(4, 3));
    assert!(
        !pawn_moves
            .iter()
            .any(|m| matches!(m.kind, MoveKind::EnPassant { .. }))
    );
}

// =============================================================================
// Castling
// =============================================================================

#[test]
fn test_king_side_castle_scenario() {
    let game =
        GameState::from_state_string("4k3/8/8/8/8/8/8/4K2R w K -", Orientation::Standard).unwrap();

    let castle = game
        .legal_moves_for_piece(at(7, 4))
        .into_iter()
        .find(|m| m.is_castle())
        .expect("castle is legal");
    assert_eq!(
        castle,
        Move::castle(CastleSide::KingSide, at(7, 4), Orientation::Standard)
    );

    let mut game = game;
    game.make_move(castle).unwrap();
    assert_eq!(game.board()[at(7, 6)].map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board()[at(7, 5)].map(|p| p.kind), Some(PieceKind::Rook));
    assert!(game.board()[at(7, 4)].is_none());
    assert!(game.board()[at(7, 7)].is_none());
    assert!(game.state_string().ends_with(" b - -"));
}

#[test]
fn test_castle_rights_lost_after_rook_round_trip() {
    let mut game =
        GameState::from_state_string("4k3/8/8/8/8/8/8/4K2R w K -", Orientation::Standard).unwrap();
    game.make_move(find(&game, at(7, 7), at(6, 7))).unwrap();
    game.make_move(find(&game, at(0, 4), at(0, 3))).unwrap();
    game.make_move(find(&game, at(6, 7), at(7, 7))).unwrap();
    game.make_move(find(&game, at(0, 3), at(0, 4))).unwrap();

    assert!(
        !game
            .legal_moves_for_piece(at(7, 4))
            .iter()
            .any(|m| m.is_castle())
    );
}

#[test]
fn test_reversed_orientation_castle() {
    // White at the top, king on column 3, king-side rook on column 0
    let mut board = Board::empty(Orientation::Reversed);
    board[at(0, 3)] = Some(Piece::new(Player::White, PieceKind::King));
    board[at(0, 0)] = Some(Piece::new(Player::White, PieceKind::Rook));
    board[at(7, 3)] = Some(Piece::new(Player::Black, PieceKind::King));
    let mut game = GameState::from_board(board, Player::White);

    let castle = game
        .legal_moves_for_piece(at(0, 3))
        .into_iter()
        .find(|m| m.is_castle())
        .expect("castle is legal");
    game.make_move(castle).unwrap();

    assert_eq!(game.board()[at(0, 1)].map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board()[at(0, 2)].map(|p| p.kind), Some(PieceKind::Rook));
}

// =============================================================================
// Material
// =============================================================================

#[test]
fn test_bare_king_against_all_sixteen() {
    let (board, _) = StateString::parse(
        "4k3/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ -",
        Orientation::Standard,
    )
    .unwrap();
    assert!(board.insufficient_material());
}

// =============================================================================
// Properties over a played-out game
// =============================================================================

/// Plays the first legal move each turn and checks invariants along the way.
#[test]
fn test_invariants_along_a_playout() {
    let mut game = GameState::new(Player::White, Orientation::Standard);

    for _ in 0..60 {
        if game.is_game_over() {
            break;
        }
        let mover = game.current_player();
        let board = game.board();

        for pos in Position::all() {
            let owned = matches!(board[pos], Some(pc) if pc.color == mover);
            if !owned {
                assert!(game.legal_moves_for_piece(pos).is_empty());
            }
        }

        // Check is exactly "some enemy move lands on the king"
        for player in [Player::White, Player::Black] {
            let king = board.king_position(player).unwrap();
            let attacked = board.piece_positions_for(player.opponent()).any(|pos| {
                board[pos]
                    .unwrap()
                    .pseudo_moves(pos, board)
                    .iter()
                    .any(|m| m.to == king)
            });
            assert_eq!(board.is_in_check(player), attacked);
        }

        let moves = game.all_legal_moves_for(mover);
        for mv in &moves {
            let mut trial = board.copy();
            mv.execute(&mut trial);
            assert!(!trial.is_in_check(mover));
        }

        let mv = *moves.last().unwrap();
        game.make_move(mv).unwrap();
    }
}

fn find(game: &GameState, from: Position, to: Position) -> Move {
    game.legal_moves_for_piece(from)
        .into_iter()
        .find(|m| m.to == to)
        .unwrap_or_else(|| panic!("{from} -> {to} not legal in {}", game.state_string()))
}
