//! Rotation Queue.
//!
//! The order of card identities by rank. Position in the queue *is* the
//! rank, so nothing is stored per card. Rotation is the only mutation.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{CardSwapError, CardSwapResult};

/// Identity of a card: its index among the discovered cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl CardId {
    /// Returns the card's original index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Cyclic order of cards, front first.
///
/// Always a permutation of `0..N`. N never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationQueue {
    order: VecDeque<CardId>,
    rotations: u64,
}

impl RotationQueue {
    /// Minimum number of cards for a swap to mean anything.
    pub const MIN_ROTATING: usize = 2;

    /// Creates the identity order for `total` cards.
    ///
    /// # Errors
    ///
    /// Returns [`CardSwapError::NoCards`] when `total` is zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(total: usize) -> CardSwapResult<Self> {
        if total == 0 {
            return Err(CardSwapError::NoCards);
        }
        Ok(Self {
            order: (0..total as u32).map(CardId).collect(),
            rotations: 0,
        })
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: a queue holds at least one card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when there are too few cards to swap. An inert carousel is
    /// placed once and never sequenced.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.order.len() < Self::MIN_ROTATING
    }

    /// Card at rank 0.
    #[must_use]
    pub fn front(&self) -> CardId {
        self.order[0]
    }

    /// Cards at ranks `1..N`, in rank order.
    pub fn rest(&self) -> impl ExactSizeIterator<Item = CardId> + '_ {
        self.order.iter().skip(1).copied()
    }

    /// Full order, front first.
    pub fn order(&self) -> impl ExactSizeIterator<Item = CardId> + '_ {
        self.order.iter().copied()
    }

    /// Rank currently held by `card`.
    #[must_use]
    pub fn rank_of(&self, card: CardId) -> Option<usize> {
        self.order.iter().position(|&c| c == card)
    }

    /// Number of rotations committed so far.
    #[must_use]
    pub const fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Moves the front card to the back; everyone else advances one rank.
    pub fn rotate_once(&mut self) {
        self.order.rotate_left(1);
        self.rotations += 1;
        tracing::debug!(rotations = self.rotations, order = ?self.order, "order rotated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queue: &RotationQueue) -> Vec<u32> {
        queue.order().map(|c| c.0).collect()
    }

    #[test]
    fn test_identity_order() {
        let queue = RotationQueue::new(4).unwrap();
        assert_eq!(ids(&queue), vec![0, 1, 2, 3]);
        assert_eq!(queue.front(), CardId(0));
        assert_eq!(queue.rest().map(|c| c.0).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_cards_rejected() {
        assert_eq!(RotationQueue::new(0), Err(CardSwapError::NoCards));
    }

    #[test]
    fn test_single_card_is_inert() {
        let queue = RotationQueue::new(1).unwrap();
        assert!(queue.is_inert());
        assert_eq!(queue.rest().len(), 0);
        assert!(!RotationQueue::new(2).unwrap().is_inert());
    }

    #[test]
    fn test_rotate_moves_front_to_back() {
        let mut queue = RotationQueue::new(4).unwrap();

        queue.rotate_once();
        assert_eq!(ids(&queue), vec![1, 2, 3, 0]);

        queue.rotate_once();
        assert_eq!(ids(&queue), vec![2, 3, 0, 1]);
        assert_eq!(queue.rotations(), 2);
        assert_eq!(queue.rank_of(CardId(0)), Some(2));
    }

    #[test]
    fn test_cyclic_permutation_property() {
        for n in 2..9usize {
            let mut queue = RotationQueue::new(n).unwrap();
            for k in 0..(3 * n) {
                let expected: Vec<u32> = (0..n).map(|i| ((i + k) % n) as u32).collect();
                assert_eq!(ids(&queue), expected, "n={n} k={k}");

                let mut sorted = ids(&queue);
                sorted.sort_unstable();
                assert_eq!(sorted, (0..n as u32).collect::<Vec<_>>());

                queue.rotate_once();
            }
        }
    }
}
