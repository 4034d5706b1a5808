//! # CARDSWAP Core
//!
//! The sequencing algebra behind the card-swap carousel: a stack of
//! overlapping cards where the front card drops away and rejoins the back
//! while the others advance one rank.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐
//! │ CardSwap     │──▶│ TimingProfile│──▶│                   │
//! │ Options      │   └──────────────┘   │  TimelineBuilder  │──▶ Sequence
//! └──────────────┘   ┌──────────────┐   │                   │   (instruction
//!                    │ SlotGeometry │──▶│                   │    records)
//!                    └──────────────┘   └─────────▲─────────┘
//!                    ┌──────────────┐             │
//!                    │RotationQueue │─────────────┘
//!                    └──────────────┘
//! ```
//!
//! Nothing here talks to an engine or a clock. A [`timeline::Sequence`] is a
//! plain list of `set` / `animate` / `call` records with label-relative
//! offsets; executing it is the host's job.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod queue;
pub mod timeline;

pub use config::{CardSwapConfig, CardSwapOptions, EaseCurve, EasingMode, TimingProfile};
pub use error::{CardSwapError, CardSwapResult};
pub use geometry::{Placement, Slot, SlotGeometry};
pub use queue::{CardId, RotationQueue};
pub use timeline::{
    Anchor, Instruction, Label, Motion, Offset, Sequence, SequenceId, Step, TimelineBuilder, Tween,
    DROP_DISTANCE, PROMOTE_STAGGER,
};
