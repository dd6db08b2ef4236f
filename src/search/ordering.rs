use crate::board::MoveInfo;

/// Interior nodes with fewer plies left than this keep generator order.
pub const ORDERING_MIN_DEPTH: u32 = 2;

fn order_key(m: &MoveInfo) -> (bool, bool, bool) {
    (!m.is_capture, !m.is_check, m.promotion.is_none())
}

/// Captures first, then checks, then promotions. Stable, so ties keep the
/// generator's order.
pub fn order_moves(moves: &mut [MoveInfo]) {
    moves.sort_by_key(order_key);
}
