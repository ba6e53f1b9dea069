//! Action history - the undo source of truth
//!
//! Every user-driven move, capture and promotion pushes one
//! [`HistoryEntry`]; undo pops the newest one. The log is unbounded and
//! in-memory only: "Start" clears it along with everything else.
//!
//! [`RemovedPieces`] is a side registry of captured pieces. It is kept in
//! step with the history (undoing a capture drops the matching record by
//! id) but undo never reads from it.

use crate::game::components::{PieceId, PieceKind};
use bevy::prelude::*;

/// One undoable action
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HistoryEntry {
    /// A free move across the board
    Move {
        piece: PieceId,
        from: Vec3,
        to: Vec3,
    },
    /// A capture; the piece was detached but kept
    Remove {
        piece: PieceId,
        position: Vec3,
        kind: PieceKind,
    },
    /// A pawn replaced by a clone of a template piece
    Promote {
        pawn: PieceId,
        promoted: PieceId,
        position: Vec3,
    },
}

impl HistoryEntry {
    /// The piece the entry will animate when undone
    pub fn piece(&self) -> PieceId {
        match self {
            HistoryEntry::Move { piece, .. } | HistoryEntry::Remove { piece, .. } => *piece,
            HistoryEntry::Promote { pawn, .. } => *pawn,
        }
    }
}

/// LIFO stack of [`HistoryEntry`]
#[derive(Debug, Default, Clone)]
pub struct ActionHistory {
    entries: Vec<HistoryEntry>,
}

impl ActionHistory {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

/// A captured piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemovedPiece {
    pub piece: PieceId,
    /// Where the piece started the game, or where it was captured if it has
    /// no initial snapshot (promoted pieces)
    pub initial_position: Vec3,
    pub kind: PieceKind,
}

#[derive(Debug, Default, Clone)]
pub struct RemovedPieces {
    pieces: Vec<RemovedPiece>,
}

impl RemovedPieces {
    pub fn push(&mut self, removed: RemovedPiece) {
        self.pieces.push(removed);
    }

    /// Drop every record of `piece`; identity based, never by kind
    pub fn forget(&mut self, piece: PieceId) {
        self.pieces.retain(|r| r.piece != piece);
    }

    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.iter().any(|r| r.piece == piece)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemovedPiece> {
        self.pieces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{PieceColor, PieceType};

    fn pawn() -> PieceKind {
        PieceKind::new(PieceColor::White, PieceType::Pawn)
    }

    #[test]
    fn test_history_default() {
        //! Verifies the history starts empty
        let history = ActionHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.last().is_none());
    }

    #[test]
    fn test_history_is_lifo() {
        //! Undo must see the newest action first
        let mut history = ActionHistory::default();
        let first = HistoryEntry::Move {
            piece: PieceId(1),
            from: Vec3::ZERO,
            to: Vec3::X,
        };
        let second = HistoryEntry::Remove {
            piece: PieceId(2),
            position: Vec3::Z,
            kind: pawn(),
        };
        history.push(first);
        history.push(second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_history_iter_is_chronological() {
        let mut history = ActionHistory::default();
        for i in 0..3 {
            history.push(HistoryEntry::Move {
                piece: PieceId(i),
                from: Vec3::ZERO,
                to: Vec3::ONE,
            });
        }
        let ids: Vec<_> = history.iter().map(|e| e.piece()).collect();
        assert_eq!(ids, vec![PieceId(0), PieceId(1), PieceId(2)]);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_promote_entry_reports_pawn() {
        let entry = HistoryEntry::Promote {
            pawn: PieceId(3),
            promoted: PieceId(40),
            position: Vec3::ZERO,
        };
        assert_eq!(entry.piece(), PieceId(3));
    }

    #[test]
    fn test_removed_pieces_forget_by_identity() {
        //! Two captured pawns of the same kind; forgetting one keeps the other
        let mut removed = RemovedPieces::default();
        removed.push(RemovedPiece {
            piece: PieceId(8),
            initial_position: Vec3::ZERO,
            kind: pawn(),
        });
        removed.push(RemovedPiece {
            piece: PieceId(9),
            initial_position: Vec3::X,
            kind: pawn(),
        });

        removed.forget(PieceId(8));

        assert_eq!(removed.len(), 1);
        assert!(!removed.contains(PieceId(8)));
        assert!(removed.contains(PieceId(9)));
    }
}
