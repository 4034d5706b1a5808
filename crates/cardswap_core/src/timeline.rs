//! # Timeline Builder
//!
//! Builds one swap sequence as an ordered list of engine instructions.
//!
//! ## Shape of a sequence
//!
//! ```text
//! t=0        drop front card by DROP_DISTANCE            (dur_drop)
//! promote    restack every other card one rank forward
//! promote+i*0.15   move card i into slot(i)              (dur_move)
//! return     restack the dropped card into the back slot
//! return     move dropped card to the back slot          (dur_return)
//! end        commit the rotation
//! ```
//!
//! `promote = dur_drop * (1 - promote_overlap)`, so promotion starts before
//! the drop finishes. `return = promote + dur_move * return_delay`.
//! `end` is the moment the last tween finishes.
//!
//! The builder is pure. It reads the queue, never mutates it, and hands the
//! list to whatever engine adapter the host provides.

use std::fmt;

use crate::config::{EaseCurve, TimingProfile};
use crate::geometry::{Slot, SlotGeometry};
use crate::queue::{CardId, RotationQueue};

/// Delay between consecutive promotion tweens, in seconds.
pub const PROMOTE_STAGGER: f32 = 0.15;

/// How far the front card falls before it returns, in layout units.
pub const DROP_DISTANCE: f32 = 500.0;

/// Identity of one built sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SequenceId(pub u64);

impl SequenceId {
    /// Returns the id after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq#{}", self.0)
    }
}

/// Named time anchor inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Where the remaining cards start moving forward.
    Promote,
    /// Where the dropped card starts travelling to the back.
    Return,
}

impl Label {
    /// Label name as engines spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Promote => "promote",
            Self::Return => "return",
        }
    }
}

/// What an offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Sequence start.
    Start,
    /// A label.
    Label(Label),
}

/// Position of an instruction: an anchor plus a delta in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Reference point.
    pub anchor: Anchor,
    /// Seconds after the anchor.
    pub delta: f32,
}

impl Offset {
    /// Offset from sequence start.
    #[must_use]
    pub const fn start(delta: f32) -> Self {
        Self {
            anchor: Anchor::Start,
            delta,
        }
    }

    /// Offset from a label.
    #[must_use]
    pub const fn label(label: Label, delta: f32) -> Self {
        Self {
            anchor: Anchor::Label(label),
            delta,
        }
    }
}

/// Renders in label-relative syntax: `"1.5"`, `"promote"`, `"promote+=0.3"`.
impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            Anchor::Start => write!(f, "{}", self.delta),
            Anchor::Label(label) if self.delta == 0.0 => f.write_str(label.name()),
            Anchor::Label(label) if self.delta < 0.0 => {
                write!(f, "{}-={}", label.name(), -self.delta)
            }
            Anchor::Label(label) => write!(f, "{}+={}", label.name(), self.delta),
        }
    }
}

/// Property change carried by a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Relative vertical move.
    DropBy {
        /// Vertical displacement.
        dy: f32,
    },
    /// Absolute move to a slot position.
    MoveTo {
        /// Target x.
        x: f32,
        /// Target y.
        y: f32,
        /// Target z.
        z: f32,
    },
}

impl Motion {
    /// Absolute move to a slot's position.
    #[must_use]
    pub const fn to_slot(slot: &Slot) -> Self {
        Self::MoveTo {
            x: slot.x,
            y: slot.y,
            z: slot.z,
        }
    }
}

/// Duration and curve of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Seconds.
    pub duration: f32,
    /// Curve identifier.
    pub ease: EaseCurve,
}

/// Side-effect step run when the playhead reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Drop the returning card to the back of the stack before it moves.
    RestackReturning {
        /// The card that was dropped.
        card: CardId,
        /// Back slot stacking order.
        stack_order: u32,
    },
    /// The sequence is logically complete: rotate the order.
    CommitRotation,
}

/// One engine instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Instant stacking-order change.
    SetStackOrder {
        /// Target card.
        card: CardId,
        /// New stacking order.
        stack_order: u32,
        /// When.
        at: Offset,
    },
    /// Tweened property change.
    Animate {
        /// Target card.
        card: CardId,
        /// What moves.
        motion: Motion,
        /// How long and along which curve.
        tween: Tween,
        /// When it starts.
        at: Offset,
    },
    /// Callback step.
    Call {
        /// What to run.
        step: Step,
        /// When.
        at: Offset,
    },
}

impl Instruction {
    /// Position of this instruction.
    #[must_use]
    pub const fn at(&self) -> Offset {
        match *self {
            Self::SetStackOrder { at, .. } | Self::Animate { at, .. } | Self::Call { at, .. } => at,
        }
    }
}

/// One complete drop/promote/return instruction set.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    id: SequenceId,
    front: CardId,
    built_at_rotation: u64,
    promote_at: f32,
    return_at: f32,
    duration: f32,
    instructions: Vec<Instruction>,
}

impl Sequence {
    /// Sequence id.
    #[must_use]
    pub const fn id(&self) -> SequenceId {
        self.id
    }

    /// Card dropped by this sequence.
    #[must_use]
    pub const fn front(&self) -> CardId {
        self.front
    }

    /// Rotation count of the queue this sequence was built from.
    #[must_use]
    pub const fn built_at_rotation(&self) -> u64 {
        self.built_at_rotation
    }

    /// Seconds from start to the rotation commit.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Instructions in issue order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Seconds from start to `label`.
    #[must_use]
    pub const fn label_time(&self, label: Label) -> f32 {
        match label {
            Label::Promote => self.promote_at,
            Label::Return => self.return_at,
        }
    }

    /// Seconds from start to `offset`.
    #[must_use]
    pub fn resolve(&self, offset: Offset) -> f32 {
        match offset.anchor {
            Anchor::Start => offset.delta,
            Anchor::Label(label) => self.label_time(label) + offset.delta,
        }
    }

    /// Instructions paired with their absolute start time, in issue order.
    pub fn timed(&self) -> impl Iterator<Item = (f32, &Instruction)> + '_ {
        self.instructions.iter().map(|i| (self.resolve(i.at()), i))
    }
}

/// Builds sequences for one carousel.
#[derive(Debug, Clone, Copy)]
pub struct TimelineBuilder {
    timing: TimingProfile,
    geometry: SlotGeometry,
}

impl TimelineBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(timing: TimingProfile, geometry: SlotGeometry) -> Self {
        Self { timing, geometry }
    }

    /// Geometry in use.
    #[must_use]
    pub const fn geometry(&self) -> &SlotGeometry {
        &self.geometry
    }

    /// Builds the next sequence from the queue's current order.
    ///
    /// Returns `None` for an inert queue (fewer than two cards).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(&self, id: SequenceId, queue: &RotationQueue) -> Option<Sequence> {
        if queue.is_inert() {
            return None;
        }

        let t = &self.timing;
        let tween = |duration| Tween {
            duration,
            ease: t.ease,
        };
        let front = queue.front();
        let mut instructions = Vec::with_capacity(2 * queue.len() + 2);

        instructions.push(Instruction::Animate {
            card: front,
            motion: Motion::DropBy { dy: DROP_DISTANCE },
            tween: tween(t.dur_drop),
            at: Offset::start(0.0),
        });
        let mut end = t.dur_drop;

        let promote_at = t.dur_drop * (1.0 - t.promote_overlap);
        for (i, card) in queue.rest().enumerate() {
            let slot = self.geometry.slot(i);
            let stagger = i as f32 * PROMOTE_STAGGER;

            instructions.push(Instruction::SetStackOrder {
                card,
                stack_order: slot.stack_order,
                at: Offset::label(Label::Promote, 0.0),
            });
            instructions.push(Instruction::Animate {
                card,
                motion: Motion::to_slot(&slot),
                tween: tween(t.dur_move),
                at: Offset::label(Label::Promote, stagger),
            });
            end = end.max(promote_at + stagger + t.dur_move);
        }

        let return_at = promote_at + t.dur_move * t.return_delay;
        let back = self.geometry.back_slot();

        // Restack before the return tween so the card never flashes on top.
        instructions.push(Instruction::Call {
            step: Step::RestackReturning {
                card: front,
                stack_order: back.stack_order,
            },
            at: Offset::label(Label::Return, 0.0),
        });
        instructions.push(Instruction::Animate {
            card: front,
            motion: Motion::to_slot(&back),
            tween: tween(t.dur_return),
            at: Offset::label(Label::Return, 0.0),
        });
        end = end.max(return_at + t.dur_return);

        instructions.push(Instruction::Call {
            step: Step::CommitRotation,
            at: Offset::start(end),
        });

        tracing::debug!(
            sequence = %id,
            front = %front,
            duration = end,
            "sequence built"
        );

        Some(Sequence {
            id,
            front,
            built_at_rotation: queue.rotations(),
            promote_at,
            return_at,
            duration: end,
            instructions,
        })
    }
}
