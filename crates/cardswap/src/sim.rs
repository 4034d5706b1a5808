//! Simulated host.
//!
//! A virtual-clock animation engine and timer service. Both advance only
//! when told to, so a whole carousel run is deterministic and can be
//! stepped frame by frame in tests or in the headless demo.
//!
//! Tweens are sampled linearly regardless of their curve. Only timing and
//! ordering are modelled faithfully.

use std::time::Duration;

use cardswap_core::{CardId, Instruction, Motion, Placement, Sequence, SequenceId};

use crate::controller::CycleController;
use crate::engine::{AnimationEngine, SequenceHandle, StepEvent};
use crate::timer::{TimerHandle, TimerService};

/// Schedule resolution. Instructions that land on the same tick are
/// simultaneous and run in issue order.
const TICKS_PER_SECOND: f64 = 1_000_000.0;

#[allow(clippy::cast_possible_truncation)]
fn tick_of(time: f32) -> i64 {
    (f64::from(time) * TICKS_PER_SECOND).round() as i64
}

/// Last applied properties of one card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardState {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Depth position.
    pub z: f32,
    /// Stacking order.
    pub stack_order: u32,
    /// Skew from initial placement.
    pub skew_y: f32,
    /// Whether the card received its initial placement.
    pub placed: bool,
}

impl CardState {
    fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    fn set_position(&mut self, [x, y, z]: [f32; 3]) {
        self.x = x;
        self.y = y;
        self.z = z;
    }
}

/// A running tween: one card moving between two positions.
#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    card: CardId,
    from: [f32; 3],
    to: [f32; 3],
    start: f32,
    duration: f32,
}

impl ActiveTween {
    fn sample(&self, time: f32) -> [f32; 3] {
        let progress = if self.duration > 0.0 {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let mut out = [0.0; 3];
        for (axis, value) in out.iter_mut().enumerate() {
            *value = self.from[axis] + (self.to[axis] - self.from[axis]) * progress;
        }
        out
    }

    fn is_complete(&self, time: f32) -> bool {
        time >= self.start + self.duration
    }
}

/// One sequence being played.
#[derive(Debug, Clone)]
struct Playback {
    id: SequenceId,
    schedule: Vec<(f32, Instruction)>,
    cursor: usize,
    playhead: f32,
    paused: bool,
    tweens: Vec<ActiveTween>,
}

impl Playback {
    fn new(sequence: &Sequence) -> Self {
        let mut timed: Vec<(usize, f32, Instruction)> = sequence
            .timed()
            .enumerate()
            .map(|(index, (time, instruction))| (index, time, *instruction))
            .collect();
        timed.sort_by_key(|&(index, time, _)| (tick_of(time), index));
        let schedule = timed
            .into_iter()
            .map(|(_, time, instruction)| (time, instruction))
            .collect();

        Self {
            id: sequence.id(),
            schedule,
            cursor: 0,
            playhead: 0.0,
            paused: false,
            tweens: Vec::new(),
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.schedule.len() && self.tweens.is_empty()
    }

    fn sample_tweens(&mut self, cards: &mut [CardState], time: f32) {
        for tween in &self.tweens {
            if let Some(card) = cards.get_mut(tween.card.index()) {
                card.set_position(tween.sample(time));
            }
        }
        self.tweens.retain(|t| !t.is_complete(time));
    }

    fn advance(&mut self, cards: &mut [CardState], dt: f32, events: &mut Vec<StepEvent>) {
        if self.paused {
            return;
        }
        let target = self.playhead + dt;

        while let Some(&(time, instruction)) = self.schedule.get(self.cursor) {
            if time > target {
                break;
            }
            self.sample_tweens(cards, time);
            self.cursor += 1;

            match instruction {
                Instruction::SetStackOrder {
                    card, stack_order, ..
                } => {
                    if let Some(state) = cards.get_mut(card.index()) {
                        state.stack_order = stack_order;
                    }
                }
                Instruction::Animate {
                    card, motion, tween, ..
                } => {
                    let Some(state) = cards.get(card.index()) else {
                        continue;
                    };
                    let from = state.position();
                    let to = match motion {
                        Motion::DropBy { dy } => [from[0], from[1] + dy, from[2]],
                        Motion::MoveTo { x, y, z } => [x, y, z],
                    };
                    // A newer tween on a card takes over from the older one.
                    self.tweens.retain(|t| t.card != card);
                    self.tweens.push(ActiveTween {
                        card,
                        from,
                        to,
                        start: time,
                        duration: tween.duration,
                    });
                }
                Instruction::Call { step, .. } => {
                    events.push(StepEvent {
                        sequence: self.id,
                        step,
                    });
                }
            }
        }

        self.sample_tweens(cards, target);
        self.playhead = target;
    }
}

/// Virtual-clock animation engine.
#[derive(Debug, Clone, Default)]
pub struct SimEngine {
    cards: Vec<CardState>,
    playbacks: Vec<Playback>,
    played: Vec<SequenceId>,
}

impl SimEngine {
    /// Creates an engine for `total` cards.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            cards: vec![CardState::default(); total],
            playbacks: Vec::new(),
            played: Vec::new(),
        }
    }

    /// Last applied state of a card.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&CardState> {
        self.cards.get(card.index())
    }

    /// Every sequence ever handed to `play`, in order.
    #[must_use]
    pub fn played(&self) -> &[SequenceId] {
        &self.played
    }

    /// Sequences still scheduled (paused or not).
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.playbacks.len()
    }

    /// Sequences currently progressing.
    #[must_use]
    pub fn progressing(&self) -> usize {
        self.playbacks.iter().filter(|p| !p.paused).count()
    }

    /// Playhead of a sequence, if it is still scheduled.
    #[must_use]
    pub fn playhead(&self, id: SequenceId) -> Option<f32> {
        self.playbacks.iter().find(|p| p.id == id).map(|p| p.playhead)
    }

    /// Whether a sequence is scheduled and frozen.
    #[must_use]
    pub fn is_paused(&self, id: SequenceId) -> bool {
        self.playbacks.iter().any(|p| p.id == id && p.paused)
    }

    /// Moves every unpaused playhead forward by `dt` seconds.
    ///
    /// Returns the steps reached, in the order they were reached.
    pub fn advance(&mut self, dt: f32) -> Vec<StepEvent> {
        let mut events = Vec::new();
        for playback in &mut self.playbacks {
            playback.advance(&mut self.cards, dt, &mut events);
        }
        self.playbacks.retain(|p| !p.is_finished());
        events
    }

    fn playback_mut(&mut self, id: SequenceId) -> Option<&mut Playback> {
        self.playbacks.iter_mut().find(|p| p.id == id)
    }
}

impl AnimationEngine for SimEngine {
    fn set_immediate(&mut self, card: CardId, placement: &Placement) {
        if let Some(state) = self.cards.get_mut(card.index()) {
            state.x = placement.slot.x;
            state.y = placement.slot.y;
            state.z = placement.slot.z;
            state.stack_order = placement.slot.stack_order;
            state.skew_y = placement.skew_y;
            state.placed = true;
        }
    }

    fn set_stack_order(&mut self, card: CardId, stack_order: u32) {
        if let Some(state) = self.cards.get_mut(card.index()) {
            state.stack_order = stack_order;
        }
    }

    fn play(&mut self, sequence: &Sequence) -> SequenceHandle {
        self.played.push(sequence.id());
        self.playbacks.push(Playback::new(sequence));
        SequenceHandle::new(sequence.id())
    }

    fn pause(&mut self, handle: SequenceHandle) {
        if let Some(playback) = self.playback_mut(handle.id()) {
            playback.paused = true;
        }
    }

    fn resume(&mut self, handle: SequenceHandle) {
        if let Some(playback) = self.playback_mut(handle.id()) {
            playback.paused = false;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Repeating {
    handle: TimerHandle,
    period: Duration,
    next_due: Duration,
}

/// Virtual-clock repeating timers.
#[derive(Debug, Clone, Default)]
pub struct SimTimers {
    now: Duration,
    next_handle: u64,
    timers: Vec<Repeating>,
}

impl SimTimers {
    /// Creates a timer service at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers.
    #[must_use]
    pub fn armed(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending fire, if any timer is armed.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Moves the clock forward and returns every fire that became due.
    ///
    /// Fires are ordered by due time.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.now += dt;
        let mut due: Vec<(Duration, TimerHandle)> = Vec::new();

        for timer in &mut self.timers {
            while timer.next_due <= self.now {
                due.push((timer.next_due, timer.handle));
                timer.next_due += timer.period;
            }
        }

        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl SimTimers {
    /// Shortest period a timer runs at. Shorter requests are clamped.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);
}

impl TimerService for SimTimers {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(Self::MIN_PERIOD);
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.timers.push(Repeating {
            handle,
            period,
            next_due: self.now + period,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

/// A carousel running on the simulated host.
pub type SimCarousel = CycleController<SimEngine, SimTimers>;

impl CycleController<SimEngine, SimTimers> {
    /// Advances the simulated host by `dt` and delivers everything that
    /// happened, in time order.
    ///
    /// The engine only ever runs up to the next due timer fire, so a fire is
    /// handled after the steps that precede it and before the ones that
    /// follow, whatever `dt` is. Steps landing exactly on a fire go first.
    pub fn advance(&mut self, dt: Duration) {
        let end = self.timers().now() + dt;

        loop {
            let now = self.timers().now();
            let until = match self.timers().next_due() {
                Some(due) if due < end => due,
                _ => end,
            };
            let slice = until.saturating_sub(now);

            let steps = self.engine_mut().advance(slice.as_secs_f32());
            for step in steps {
                self.on_step(step);
            }

            let fires = self.timers_mut().advance(slice);
            for handle in fires {
                self.on_timer(handle);
            }

            if until >= end {
                break;
            }
        }
    }

    /// Advances in fixed `frame` steps until `total` has elapsed.
    pub fn run_for(&mut self, total: Duration, frame: Duration) {
        if frame.is_zero() {
            return;
        }
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            let dt = frame.min(total - elapsed);
            self.advance(dt);
            elapsed += dt;
        }
    }
}
