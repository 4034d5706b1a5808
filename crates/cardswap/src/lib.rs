//! # CARDSWAP
//!
//! Runtime for the card-swap carousel: a stack of overlapping cards where
//! the front card drops away and rejoins the back on a timer, pausable by
//! hovering the container.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          HOST                                │
//! │  pointer enter/leave    timer fires        engine steps      │
//! │          │                   │                   │           │
//! │          ▼                   ▼                   ▼           │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                  CycleController                       │  │
//! │  │  RotationQueue ─▶ TimelineBuilder ─▶ Sequence          │  │
//! │  └───────┬──────────────────────────────────┬─────────────┘  │
//! │          ▼                                  ▼                │
//! │   AnimationEngine::play / pause / resume   TimerService      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread inside host callbacks. The engine and timer
//! are capabilities ([`AnimationEngine`], [`TimerService`]); [`sim`] provides
//! virtual-clock versions of both.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod controller;
pub mod engine;
pub mod host;
pub mod sim;
pub mod timer;

pub use controller::{CycleController, CycleState, HostEvent};
pub use engine::{AnimationEngine, SequenceHandle, StepEvent};
pub use host::{init_card_swap, try_init, CardContainer, InitError};
pub use sim::{CardState, SimCarousel, SimEngine, SimTimers};
pub use timer::{TimerHandle, TimerService};
