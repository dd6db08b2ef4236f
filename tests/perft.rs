use elobot::perft::perft;
use elobot::{Position, Rules};

#[test]
fn perft_startpos_small_depths() {
    let mut p = Position::startpos();
    let fen = p.fen();
    assert_eq!(perft(&mut p, 1).unwrap(), 20);
    assert_eq!(perft(&mut p, 2).unwrap(), 400);
    assert_eq!(perft(&mut p, 3).unwrap(), 8902);
    assert_eq!(p.fen(), fen);
    assert_eq!(p.ply_count(), 0);
}

#[test]
fn perft_kiwipete_exercises_castling_and_en_passant() {
    let mut p = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let fen = p.fen();
    assert_eq!(perft(&mut p, 1).unwrap(), 48);
    assert_eq!(perft(&mut p, 2).unwrap(), 2039);
    assert_eq!(p.fen(), fen);
}
