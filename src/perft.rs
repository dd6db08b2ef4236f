use crate::board::Rules;
use crate::error::Result;

// Make/unmake perft over the rules binding (no cloning)
pub fn perft<R: Rules>(pos: &mut R, depth: u32) -> Result<u64> {
    if depth == 0 { return Ok(1); }
    let moves = pos.legal_moves();
    if depth == 1 { return Ok(moves.len() as u64); }
    let mut nodes = 0u64;
    for m in moves {
        pos.apply(m.mv)?;
        let sub = perft(pos, depth - 1);
        pos.undo()?;
        nodes += sub?;
    }
    Ok(nodes)
}
