//! Horizontal collision avoidance and ledger-line extent.
//!
//! Following Gardner Read's *Music Notation*: the interval of a second is
//! written with the stem between the noteheads and the higher pitch to the
//! right. In a cluster the noteheads alternate left/right, so two
//! neighbouring notes are never both pushed.

use crate::model::StavePosition;

/// Single-pass greedy push decision over ascending positions.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPush {
    threshold: i32,
    prev: Option<i32>,
    prev_pushed: bool,
}

impl GreedyPush {
    /// `threshold` is the largest gap above the previous note that still
    /// clashes: 1 stave step for noteheads.
    pub fn new(threshold: i32) -> Self {
        Self { threshold, prev: None, prev_pushed: false }
    }

    /// Decide for the next note in ascending order.
    pub fn decide(&mut self, position: i32) -> bool {
        let clashes = self.prev.is_some_and(|prev| position <= prev + self.threshold);
        let pushed = clashes && !self.prev_pushed;
        self.prev = Some(position);
        self.prev_pushed = pushed;
        pushed
    }
}

/// Push flag per note for ascending stave positions.
pub fn assign_push_flags(positions: &[StavePosition]) -> Vec<bool> {
    let mut push = GreedyPush::new(1);
    positions.iter().map(|&p| push.decide(p)).collect()
}

/// Ledger lines needed outside the five staff lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerLines {
    pub below: i32,
    pub above: i32,
}

impl LedgerLines {
    /// Staff line indices to draw, bottom line = 0, top line = 4.
    pub fn line_indices(self) -> impl Iterator<Item = i32> {
        (-self.below..0).chain(5..5 + self.above)
    }
}

pub fn ledger_lines(lowest: StavePosition, highest: StavePosition) -> LedgerLines {
    // Integer division truncates toward zero, so a note in the space just
    // below the staff (-1) or just above it (9) needs no line.
    LedgerLines {
        below: (-lowest / 2).max(0),
        above: (highest / 2 - 4).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_notes_are_not_pushed() {
        assert_eq!(assign_push_flags(&[-2, 0, 2]), vec![false, false, false]);
        assert_eq!(assign_push_flags(&[]), Vec::<bool>::new());
    }

    #[test]
    fn a_second_pushes_the_upper_note() {
        assert_eq!(assign_push_flags(&[3, 4]), vec![false, true]);
        // unison on the staff (C and C#) clashes too
        assert_eq!(assign_push_flags(&[-2, -2]), vec![false, true]);
    }

    #[test]
    fn clusters_alternate() {
        assert_eq!(
            assign_push_flags(&[0, 1, 2, 3, 4]),
            vec![false, true, false, true, false]
        );
    }

    #[test]
    fn never_two_adjacent_pushes() {
        let positions: Vec<i32> = (0..40).map(|i| i / 3).collect();
        let flags = assign_push_flags(&positions);
        assert!(flags.windows(2).all(|w| !(w[0] && w[1])));
    }

    #[test]
    fn ledger_counts() {
        assert_eq!(ledger_lines(0, 8), LedgerLines { below: 0, above: 0 });
        assert_eq!(ledger_lines(-1, 9), LedgerLines { below: 0, above: 0 });
        assert_eq!(ledger_lines(-2, 10), LedgerLines { below: 1, above: 1 });
        assert_eq!(ledger_lines(-5, 13), LedgerLines { below: 2, above: 2 });
        assert_eq!(ledger_lines(20, 30), LedgerLines { below: 0, above: 11 });
        let lines: Vec<i32> = ledger_lines(-4, 12).line_indices().collect();
        assert_eq!(lines, vec![-2, -1, 5, 6]);
    }
}
