//! # Cycle Controller
//!
//! Owns the repeating trigger and the hover pause state, and makes sure at
//! most one sequence is ever in flight.
//!
//! ## States
//!
//! - **Idle**: built, or placed but inert (fewer than two cards).
//! - **Running**: timer armed, sequences fire on every period.
//! - **Paused**: timer disarmed, active sequence frozen in place.
//! - **Disposed**: torn down, every further event is ignored.
//!
//! ## Transitions
//!
//! ```text
//!            start()                 pointer enter
//!   Idle ───────────────▶ Running ─────────────────▶ Paused
//!                            ▲                          │
//!                            └──────── pointer leave ───┘
//!   any ── dispose() ──▶ Disposed
//! ```
//!
//! All mutation happens inside one event callback. Rotation is committed by
//! the sequence's own completion step, so the next sequence is always built
//! from the rotated order.

use cardswap_core::{
    CardSwapConfig, CardSwapResult, RotationQueue, Sequence, SequenceId, SlotGeometry, Step,
    TimelineBuilder,
};

use crate::engine::{AnimationEngine, SequenceHandle, StepEvent};
use crate::timer::{TimerHandle, TimerService};

/// Lifecycle state of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Not cycling.
    Idle,
    /// Cycling on the timer.
    Running,
    /// Frozen by hover.
    Paused,
    /// Torn down.
    Disposed,
}

/// Event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A repeating timer fired.
    TimerFired(TimerHandle),
    /// A sequence reached one of its `call` steps.
    Step(StepEvent),
    /// Pointer entered the container.
    PointerEnter,
    /// Pointer left the container.
    PointerLeave,
}

/// The carousel's state machine.
#[derive(Debug)]
pub struct CycleController<E, T> {
    config: CardSwapConfig,
    builder: TimelineBuilder,
    queue: RotationQueue,
    engine: E,
    timers: T,
    state: CycleState,
    placed: bool,
    active: Option<SequenceHandle>,
    active_rotation: u64,
    timer: Option<TimerHandle>,
    next_id: SequenceId,
}

impl<E: AnimationEngine, T: TimerService> CycleController<E, T> {
    /// Creates an idle controller for `total` cards.
    ///
    /// Nothing is placed or scheduled until [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns [`cardswap_core::CardSwapError::NoCards`] when `total` is zero.
    pub fn new(config: CardSwapConfig, total: usize, engine: E, timers: T) -> CardSwapResult<Self> {
        let queue = RotationQueue::new(total)?;
        let builder = TimelineBuilder::new(config.timing, SlotGeometry::from_config(&config, total));

        Ok(Self {
            config,
            builder,
            queue,
            engine,
            timers,
            state: CycleState::Idle,
            placed: false,
            active: None,
            active_rotation: 0,
            timer: None,
            next_id: SequenceId(1),
        })
    }

    /// Places every card, fires the first sequence and arms the timer.
    ///
    /// An inert carousel is placed and stays `Idle`. Calling this twice is a
    /// no-op.
    pub fn start(&mut self) {
        if self.state != CycleState::Idle || self.placed {
            return;
        }

        let geometry = *self.builder.geometry();
        for (card, placement) in self
            .queue
            .order()
            .zip(geometry.initial_placements(self.config.skew_amount))
        {
            self.engine.set_immediate(card, &placement);
        }
        self.placed = true;

        if self.queue.is_inert() {
            tracing::info!(cards = self.queue.len(), "carousel placed, too few cards to cycle");
            return;
        }

        self.trigger();
        self.arm();
        self.state = CycleState::Running;
        tracing::info!(
            cards = self.queue.len(),
            delay = ?self.config.delay,
            easing = ?self.config.easing,
            "carousel started"
        );
    }

    /// Dispatches a host event.
    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::TimerFired(handle) => self.on_timer(handle),
            HostEvent::Step(step) => self.on_step(step),
            HostEvent::PointerEnter => self.pointer_enter(),
            HostEvent::PointerLeave => self.pointer_leave(),
        }
    }

    /// Pointer entered the container. Pauses if hover pausing is enabled.
    pub fn pointer_enter(&mut self) {
        if self.config.pause_on_hover {
            self.pause();
        }
    }

    /// Pointer left the container. Resumes if hover pausing is enabled.
    pub fn pointer_leave(&mut self) {
        if self.config.pause_on_hover {
            self.resume();
        }
    }

    /// Freezes the active sequence and disarms the timer.
    ///
    /// Returns false (and changes nothing) unless the carousel is running.
    pub fn pause(&mut self) -> bool {
        if self.state != CycleState::Running {
            return false;
        }

        self.disarm();
        if let Some(handle) = self.active {
            self.engine.pause(handle);
        }
        self.state = CycleState::Paused;
        tracing::debug!(active = ?self.active.map(SequenceHandle::id), "carousel paused");
        true
    }

    /// Resumes the frozen sequence and re-arms the timer if none is armed.
    ///
    /// Never starts a new sequence. Returns false (and changes nothing)
    /// unless the carousel is paused.
    pub fn resume(&mut self) -> bool {
        if self.state != CycleState::Paused {
            return false;
        }

        if let Some(handle) = self.active {
            self.engine.resume(handle);
        }
        if self.timer.is_none() {
            self.arm();
        }
        self.state = CycleState::Running;
        tracing::debug!(active = ?self.active.map(SequenceHandle::id), "carousel resumed");
        true
    }

    /// Handles a timer fire.
    ///
    /// Only the currently armed timer counts, and only while running. A fire
    /// that lands while a sequence is still in flight is dropped.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.state != CycleState::Running || self.timer != Some(handle) {
            tracing::trace!(timer = %handle, state = ?self.state, "stale timer fire ignored");
            return;
        }
        if let Some(active) = self.active {
            tracing::debug!(active = %active.id(), "previous sequence still in flight, fire dropped");
            return;
        }
        self.trigger();
    }

    /// Handles a step notification from the engine.
    ///
    /// Steps from anything but the active sequence are ignored, which makes
    /// the rotation commit single-shot.
    pub fn on_step(&mut self, event: StepEvent) {
        if self.state == CycleState::Disposed {
            return;
        }
        if self.active.map(SequenceHandle::id) != Some(event.sequence) {
            tracing::trace!(sequence = %event.sequence, "step from inactive sequence ignored");
            return;
        }

        match event.step {
            Step::RestackReturning { card, stack_order } => {
                self.engine.set_stack_order(card, stack_order);
            }
            Step::CommitRotation => {
                self.active = None;
                if self.active_rotation != self.queue.rotations() {
                    tracing::debug!(
                        sequence = %event.sequence,
                        built_at = self.active_rotation,
                        rotations = self.queue.rotations(),
                        "commit against stale order ignored"
                    );
                    return;
                }
                self.queue.rotate_once();
                tracing::debug!(
                    sequence = %event.sequence,
                    front = %self.queue.front(),
                    "rotation committed"
                );
            }
        }
    }

    /// Tears the carousel down: disarms the timer and ignores every later
    /// event. The in-flight sequence, if any, is left to the engine.
    pub fn dispose(&mut self) {
        if self.state == CycleState::Disposed {
            return;
        }
        self.disarm();
        self.active = None;
        self.state = CycleState::Disposed;
        tracing::info!(rotations = self.queue.rotations(), "carousel disposed");
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CycleState {
        self.state
    }

    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &CardSwapConfig {
        &self.config
    }

    /// Current card order.
    #[must_use]
    pub const fn queue(&self) -> &RotationQueue {
        &self.queue
    }

    /// Handle of the sequence in flight, if any.
    #[must_use]
    pub const fn active_sequence(&self) -> Option<SequenceHandle> {
        self.active
    }

    /// Handle of the armed timer, if any.
    #[must_use]
    pub const fn armed_timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably. Hosts drive their engine through this.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The timer service.
    #[must_use]
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    /// The timer service, mutably.
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    fn trigger(&mut self) {
        let id = self.next_id;
        let Some(sequence) = self.builder.build(id, &self.queue) else {
            return;
        };
        self.next_id = id.next();
        self.active_rotation = sequence.built_at_rotation();
        self.active = Some(self.play(&sequence));
    }

    fn play(&mut self, sequence: &Sequence) -> SequenceHandle {
        tracing::debug!(
            sequence = %sequence.id(),
            front = %sequence.front(),
            "sequence issued"
        );
        self.engine.play(sequence)
    }

    fn arm(&mut self) {
        let handle = self.timers.schedule_repeating(self.config.delay);
        tracing::debug!(timer = %handle, "timer armed");
        self.timer = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.timers.cancel(handle);
            tracing::debug!(timer = %handle, "timer disarmed");
        }
    }
}
