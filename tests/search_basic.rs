use cozy_chess::{Color, Move, Piece, Square};
use elobot::search::Searcher;
use elobot::{EngineError, MoveInfo, Position, Rules};
use pretty_assertions::assert_eq;

// Delegating wrapper that counts apply/undo traffic and can be told to refuse
// the n-th apply.
struct Instrumented {
    inner: Position,
    applies: usize,
    undos: usize,
    fail_on_apply: Option<usize>,
}

impl Instrumented {
    fn new(inner: Position) -> Self { Self { inner, applies: 0, undos: 0, fail_on_apply: None } }
}

impl Rules for Instrumented {
    fn legal_moves(&self) -> Vec<MoveInfo> { self.inner.legal_moves() }
    fn has_legal_moves(&self) -> bool { self.inner.has_legal_moves() }
    fn apply(&mut self, mv: Move) -> elobot::Result<()> {
        if self.fail_on_apply == Some(self.applies) {
            return Err(EngineError::IllegalMove(format!("{}", mv)));
        }
        self.applies += 1;
        self.inner.apply(mv)
    }
    fn undo(&mut self) -> elobot::Result<Move> {
        self.undos += 1;
        self.inner.undo()
    }
    fn turn(&self) -> Color { self.inner.turn() }
    fn in_check(&self) -> bool { self.inner.in_check() }
    fn is_threefold_repetition(&self) -> bool { self.inner.is_threefold_repetition() }
    fn is_insufficient_material(&self) -> bool { self.inner.is_insufficient_material() }
    fn is_fifty_moves(&self) -> bool { self.inner.is_fifty_moves() }
    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> { self.inner.piece_at(sq) }
    fn fen(&self) -> String { self.inner.fen() }
}

fn best_uci(fen: &str, depth: u32) -> Option<String> {
    let mut pos = Position::from_fen(fen).expect("valid fen");
    let mv = Searcher::default().choose_move(&mut pos, depth).expect("search");
    mv.map(|m| pos.to_uci(m))
}

#[test]
fn search_returns_legal_move_startpos() {
    let mut pos = Position::startpos();
    let legal: Vec<Move> = pos.legal_moves().into_iter().map(|m| m.mv).collect();
    assert_eq!(legal.len(), 20);
    let bm = elobot::choose_move(&mut pos, 1).expect("search").expect("no move found at depth 1");
    assert!(legal.contains(&bm), "{} is not a legal opening move", bm);
}

#[test]
fn search_prefers_winning_queen_capture() {
    // Qe2xd2 wins a queen
    let bm = best_uci("k7/8/8/8/8/8/3qQ3/7K w - - 0 1", 1).expect("expected a best move");
    assert_eq!(bm, "e2d2");
}

#[test]
fn finds_back_rank_mate_for_white_at_every_depth() {
    for depth in 1..=3 {
        let bm = best_uci("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", depth);
        assert_eq!(bm.as_deref(), Some("a1a8"), "depth {depth}");
    }
}

#[test]
fn finds_back_rank_mate_for_black_at_every_depth() {
    for depth in 1..=3 {
        let bm = best_uci("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", depth);
        assert_eq!(bm.as_deref(), Some("a8a1"), "depth {depth}");
    }
}

#[test]
fn mate_score_is_reported_from_whites_viewpoint() {
    let mut pos = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let res = Searcher::default().search_depth(&mut pos, 2).unwrap();
    assert!(res.score_cp.unwrap() <= -9_000, "black mating should score strongly negative: {:?}", res.score_cp);
}

#[test]
fn no_legal_moves_returns_none() {
    // Stalemate and checkmate both yield no move
    assert_eq!(best_uci("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3), None);
    assert_eq!(best_uci("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", 3), None);
}

#[test]
fn single_legal_move_returned_without_searching() {
    // Black king on h8: g8 and g7 are covered by the rook, only Kh7 remains
    let pos = Position::from_fen("7k/8/8/8/8/8/8/6RK b - - 0 1").unwrap();
    assert_eq!(pos.legal_moves_count(), 1);
    let mut inst = Instrumented::new(pos);
    let mut s = Searcher::default();
    let res = s.search_depth(&mut inst, 5).unwrap();
    assert_eq!(res.bestmove.map(|m| inst.inner.to_uci(m)).as_deref(), Some("h8h7"));
    assert_eq!(res.nodes, 0);
    assert_eq!(s.nodes(), 0);
    assert_eq!(inst.applies, 0);
}

#[test]
fn apply_undo_balance_leaves_position_identical() {
    let played: Vec<String> = ["e2e4", "e7e5", "g1f3", "b8c6"].iter().map(|s| s.to_string()).collect();
    let pos = Position::set_from_start_and_moves(&played).unwrap();
    let fen_before = pos.fen();
    let mut inst = Instrumented::new(pos);
    let res = Searcher::default().search_depth(&mut inst, 3).unwrap();
    assert!(res.bestmove.is_some());
    assert!(inst.applies > 0);
    assert_eq!(inst.applies, inst.undos);
    assert_eq!(inst.fen(), fen_before);
    assert_eq!(inst.inner.history_uci(), played);
}

#[test]
fn collaborator_failure_propagates_and_unwinds() {
    let pos = Position::startpos();
    let fen_before = pos.fen();
    let mut inst = Instrumented::new(pos);
    inst.fail_on_apply = Some(5);
    let err = Searcher::default().search_depth(&mut inst, 3).unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove(_)));
    // Every frame that applied a move undid it on the way out
    assert_eq!(inst.applies, inst.undos);
    assert_eq!(inst.fen(), fen_before);
    assert_eq!(inst.inner.ply_count(), 0);
}

#[test]
fn repeated_searches_are_independent() {
    let mut pos = Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4").unwrap();
    let mut s = Searcher::default();
    let a = s.search_depth(&mut pos, 2).unwrap();
    let b = s.search_depth(&mut pos, 2).unwrap();
    assert_eq!(a.bestmove, b.bestmove);
    assert_eq!(a.score_cp, b.score_cp);
    assert_eq!(a.nodes, b.nodes);
    // Scholar's mate is on the board
    assert_eq!(a.bestmove.map(|m| pos.to_uci(m)).as_deref(), Some("h5f7"));
}
