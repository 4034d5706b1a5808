//! Initialization entry point.
//!
//! The host decides when to call [`init_card_swap`] (on ready, on mount,
//! ...). A missing container, a missing engine or an empty container makes
//! the call a silent no-op: nothing is placed and nothing is scheduled.

use thiserror::Error;

use cardswap_core::{CardSwapError, CardSwapOptions};

use crate::controller::CycleController;
use crate::engine::AnimationEngine;
use crate::timer::TimerService;

/// Anything that holds the carousel's cards.
pub trait CardContainer {
    /// Number of qualifying cards in the container.
    fn card_count(&self) -> usize;
}

impl<C> CardContainer for [C] {
    fn card_count(&self) -> usize {
        self.len()
    }
}

impl<C> CardContainer for Vec<C> {
    fn card_count(&self) -> usize {
        self.len()
    }
}

/// Why a carousel did not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The host passed no container.
    #[error("carousel container missing")]
    ContainerMissing,

    /// No animation engine is available.
    #[error("animation engine unavailable")]
    EngineUnavailable,

    /// The carousel could not be prepared.
    #[error(transparent)]
    Setup(#[from] CardSwapError),
}

/// Builds and starts a carousel, reporting why it could not.
///
/// # Errors
///
/// Returns [`InitError`] when a precondition is absent. Nothing has been
/// placed or scheduled in that case.
pub fn try_init<C, E, T>(
    container: Option<&C>,
    engine: Option<E>,
    timers: T,
    options: &CardSwapOptions,
) -> Result<CycleController<E, T>, InitError>
where
    C: CardContainer + ?Sized,
    E: AnimationEngine,
    T: TimerService,
{
    let container = container.ok_or(InitError::ContainerMissing)?;
    let engine = engine.ok_or(InitError::EngineUnavailable)?;

    let mut controller =
        CycleController::new(options.resolve(), container.card_count(), engine, timers)?;
    controller.start();
    Ok(controller)
}

/// Builds and starts a carousel.
///
/// Returns `None` (after logging the reason at debug level) when the
/// container or engine is missing or there are no cards. The caller keeps
/// the returned controller to feed it host events and to dispose of it.
pub fn init_card_swap<C, E, T>(
    container: Option<&C>,
    engine: Option<E>,
    timers: T,
    options: &CardSwapOptions,
) -> Option<CycleController<E, T>>
where
    C: CardContainer + ?Sized,
    E: AnimationEngine,
    T: TimerService,
{
    match try_init(container, engine, timers, options) {
        Ok(controller) => Some(controller),
        Err(reason) => {
            tracing::debug!(%reason, "card swap not initialized");
            None
        }
    }
}
