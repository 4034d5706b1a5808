//! Animation Engine capability.
//!
//! The carousel never interpolates anything itself. It hands finished
//! [`Sequence`]s to an engine adapter and gets [`StepEvent`]s back when the
//! engine's playhead reaches a `call` instruction.

use cardswap_core::{CardId, Placement, Sequence, SequenceId, Step};

/// Handle to a sequence the engine has been asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceHandle(SequenceId);

impl SequenceHandle {
    /// Wraps a sequence id. Engines create handles, the controller stores them.
    #[must_use]
    pub const fn new(id: SequenceId) -> Self {
        Self(id)
    }

    /// Sequence this handle drives.
    #[must_use]
    pub const fn id(self) -> SequenceId {
        self.0
    }
}

/// Notification that a sequence's playhead reached a `call` instruction.
///
/// Each step fires once per sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent {
    /// Sequence that reached the step.
    pub sequence: SequenceId,
    /// The step itself.
    pub step: Step,
}

/// What the carousel needs from an animation engine.
pub trait AnimationEngine {
    /// Applies a placement with no tween.
    fn set_immediate(&mut self, card: CardId, placement: &Placement);

    /// Applies a stacking order with no tween.
    fn set_stack_order(&mut self, card: CardId, stack_order: u32);

    /// Schedules every instruction of `sequence` and starts playing it.
    ///
    /// `call` instructions must be reported back as [`StepEvent`]s, in
    /// instruction order, once the playhead reaches them.
    fn play(&mut self, sequence: &Sequence) -> SequenceHandle;

    /// Freezes a sequence where it is. Nothing is cancelled or reset.
    fn pause(&mut self, handle: SequenceHandle);

    /// Continues a frozen sequence from where it stopped.
    fn resume(&mut self, handle: SequenceHandle);
}

impl<E: AnimationEngine + ?Sized> AnimationEngine for &mut E {
    fn set_immediate(&mut self, card: CardId, placement: &Placement) {
        (**self).set_immediate(card, placement);
    }

    fn set_stack_order(&mut self, card: CardId, stack_order: u32) {
        (**self).set_stack_order(card, stack_order);
    }

    fn play(&mut self, sequence: &Sequence) -> SequenceHandle {
        (**self).play(sequence)
    }

    fn pause(&mut self, handle: SequenceHandle) {
        (**self).pause(handle);
    }

    fn resume(&mut self, handle: SequenceHandle) {
        (**self).resume(handle);
    }
}
