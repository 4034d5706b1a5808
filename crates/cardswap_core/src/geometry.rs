//! Slot Geometry.
//!
//! Maps a rank (0 = front) to the card's 3-D offset and stacking order.
//! Deeper ranks sit further right, higher, further back and lower in the
//! stack, which produces the fanned-out look.

use crate::config::CardSwapConfig;

/// Geometric and stacking target for one rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset (negative is up).
    pub y: f32,
    /// Depth offset (negative is away from the viewer).
    pub z: f32,
    /// Stacking order. Higher draws on top.
    pub stack_order: u32,
}

/// Everything the initial `set` applies to one card.
///
/// Issued once per card at startup. Sequences never touch skew or anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position and stacking for the card's starting rank.
    pub slot: Slot,
    /// Horizontal anchor shift, percent of the card's own width.
    pub x_percent: f32,
    /// Vertical anchor shift, percent of the card's own height.
    pub y_percent: f32,
    /// Constant vertical skew.
    pub skew_y: f32,
    /// Transform origin, as fractions of the card's box.
    pub transform_origin: (f32, f32),
    /// Promote the card to its own compositing layer.
    pub force_3d: bool,
}

/// Slot calculator for a fixed card count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    card_distance: f32,
    vertical_distance: f32,
    total: usize,
}

impl SlotGeometry {
    /// Depth travelled per rank, relative to `card_distance`.
    pub const DEPTH_FACTOR: f32 = 1.5;
    /// Anchor shift that centers a card on its position.
    pub const CENTER_PERCENT: f32 = -50.0;

    /// Creates a geometry for `total` cards.
    #[must_use]
    pub const fn new(card_distance: f32, vertical_distance: f32, total: usize) -> Self {
        Self {
            card_distance,
            vertical_distance,
            total,
        }
    }

    /// Creates a geometry from a resolved config.
    #[must_use]
    pub const fn from_config(config: &CardSwapConfig, total: usize) -> Self {
        Self::new(config.card_distance, config.vertical_distance, total)
    }

    /// Returns the slot for `rank`.
    ///
    /// Defined for `rank < total`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn slot(&self, rank: usize) -> Slot {
        debug_assert!(rank < self.total, "rank {rank} out of {}", self.total);
        let r = rank as f32;
        Slot {
            x: r * self.card_distance,
            y: -r * self.vertical_distance,
            z: -r * self.card_distance * Self::DEPTH_FACTOR,
            stack_order: self.total.saturating_sub(rank) as u32,
        }
    }

    /// Returns the slot of the last rank.
    #[must_use]
    pub fn back_slot(&self) -> Slot {
        self.slot(self.total.saturating_sub(1))
    }

    /// Returns the initial placement for the card starting at `rank`.
    #[must_use]
    pub fn placement(&self, rank: usize, skew_y: f32) -> Placement {
        Placement {
            slot: self.slot(rank),
            x_percent: Self::CENTER_PERCENT,
            y_percent: Self::CENTER_PERCENT,
            skew_y,
            transform_origin: (0.5, 0.5),
            force_3d: true,
        }
    }

    /// Returns the placement of every rank, front to back.
    pub fn initial_placements(&self, skew_y: f32) -> impl Iterator<Item = Placement> + '_ {
        (0..self.total).map(move |rank| self.placement(rank, skew_y))
    }
}
