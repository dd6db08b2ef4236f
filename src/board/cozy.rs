use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};
use crate::board::{MoveInfo, Rules};
use crate::error::{EngineError, Result};

/// A cozy-chess board plus the stack of prior boards, so moves can be undone
/// and repetitions detected.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    history: Vec<(CozyBoard, Move)>,
    from_startpos: bool,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), history: Vec::new(), from_startpos: true }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = CozyBoard::from_fen(fen.trim(), false).map_err(|e| EngineError::Fen(format!("{e:?}")))?;
        let from_startpos = format!("{}", board) == format!("{}", CozyBoard::default());
        Ok(Self { board, history: Vec::new(), from_startpos })
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    /// Plies applied since this position was created.
    pub fn ply_count(&self) -> usize { self.history.len() }

    pub fn started_from_startpos(&self) -> bool { self.from_startpos }

    /// Standard UCI text for a move legal in the current position. cozy-chess
    /// encodes castling as king-takes-rook; this converts it to `e1g1`/`e1c1`.
    pub fn to_uci(&self, mv: Move) -> String { uci_on(&self.board, mv) }

    /// UCI text of every move played since the root, oldest first.
    pub fn history_uci(&self) -> Vec<String> {
        self.history.iter().map(|(b, m)| uci_on(b, *m)).collect()
    }

    pub fn find_move_uci(&self, mv_uci: &str) -> Option<Move> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if uci_on(&self.board, m) == mv_uci || format!("{}", m) == mv_uci { found = Some(m); break; }
            }
            found.is_some()
        });
        found
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<Move> {
        let m = self.find_move_uci(mv_uci).ok_or_else(|| EngineError::IllegalMove(mv_uci.to_string()))?;
        self.apply(m)?;
        Ok(m)
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }
}

fn uci_on(board: &CozyBoard, mv: Move) -> String {
    let stm = board.side_to_move();
    if board.piece_on(mv.from) == Some(Piece::King) && board.colors(stm).has(mv.to) {
        let file = if mv.to.file() as usize > mv.from.file() as usize { File::G } else { File::C };
        return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
    }
    format!("{}", mv)
}

fn square_shade(sq: Square) -> usize { (sq.file() as usize + sq.rank() as usize) % 2 }

impl Rules for Position {
    fn legal_moves(&self) -> Vec<MoveInfo> {
        let board = &self.board;
        let theirs = board.colors(!board.side_to_move());
        let mut out = Vec::with_capacity(64);
        board.generate_moves(|moves| {
            let piece = moves.piece;
            for m in moves {
                let en_passant = piece == Piece::Pawn && m.from.file() != m.to.file();
                let mut child = board.clone();
                child.play_unchecked(m);
                out.push(MoveInfo {
                    mv: m,
                    piece,
                    is_capture: theirs.has(m.to) || en_passant,
                    is_check: !child.checkers().is_empty(),
                    promotion: m.promotion,
                });
            }
            false
        });
        out
    }

    fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    fn apply(&mut self, mv: Move) -> Result<()> {
        if !self.board.is_legal(mv) {
            return Err(EngineError::IllegalMove(format!("{} in {}", mv, self.board)));
        }
        let prev = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push((prev, mv));
        Ok(())
    }

    fn undo(&mut self) -> Result<Move> {
        let (prev, mv) = self.history.pop().ok_or(EngineError::EmptyHistory)?;
        self.board = prev;
        Ok(mv)
    }

    fn turn(&self) -> Color { self.board.side_to_move() }

    fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn is_threefold_repetition(&self) -> bool {
        // Nothing before the last capture or pawn move can recur.
        let h = self.board.hash();
        let window = self.board.halfmove_clock() as usize;
        let seen = self.history.iter().rev().take(window).filter(|(b, _)| b.hash() == h).count();
        seen + 1 >= 3
    }

    fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if (knights | bishops).len() <= 1 { return true; }
        if !knights.is_empty() { return false; }
        let mut shades = bishops.into_iter().map(square_shade);
        let first = shades.next();
        shades.all(|s| Some(s) == first)
    }

    fn is_fifty_moves(&self) -> bool { self.board.halfmove_clock() >= 100 }

    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        Some((self.board.piece_on(sq)?, self.board.color_on(sq)?))
    }

    fn fen(&self) -> String { format!("{}", self.board) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_restores_prior_board() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        pos.make_move_uci("e2e4").unwrap();
        assert_ne!(pos.fen(), before);
        pos.undo().unwrap();
        assert_eq!(pos.fen(), before);
        assert!(matches!(pos.undo(), Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn illegal_apply_leaves_position_untouched() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let bogus: Move = "e2e5".parse().unwrap();
        assert!(matches!(pos.apply(bogus), Err(EngineError::IllegalMove(_))));
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn castling_round_trips_through_standard_uci() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = pos.find_move_uci("e1g1").expect("short castle");
        assert_eq!(pos.to_uci(short), "e1g1");
        let long = pos.find_move_uci("e1a1").expect("king-takes-rook form accepted");
        assert_eq!(pos.to_uci(long), "e1c1");
    }

    #[test]
    fn moves_from_one_square() {
        let pos = Position::startpos();
        let knight: Vec<String> = pos.legal_moves_from(Square::G1).iter().map(|m| pos.to_uci(m.mv)).collect();
        assert_eq!(knight, vec!["g1f3".to_string(), "g1h3".to_string()]);
        assert!(pos.legal_moves_from(Square::E4).is_empty());
    }

    #[test]
    fn en_passant_is_flagged_as_capture() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = pos.legal_moves().into_iter().find(|m| pos.to_uci(m.mv) == "e5d6").expect("ep legal");
        assert!(ep.is_capture);
    }

    #[test]
    fn insufficient_material_cases() {
        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let minor = Position::from_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1").unwrap();
        let same_shade = Position::from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        let two_knights = Position::from_fen("4k3/8/8/8/8/8/8/2NNK3 w - - 0 1").unwrap();
        let rook = Position::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
        assert!(bare.is_insufficient_material());
        assert!(minor.is_insufficient_material());
        assert!(same_shade.is_insufficient_material());
        assert!(!two_knights.is_insufficient_material());
        assert!(!rook.is_insufficient_material());
    }
}
