//! Host timer service capability.

use std::fmt;
use std::time::Duration;

/// Handle to an armed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Repeating timers provided by the host.
///
/// Fires are delivered back to the carousel by the host, tagged with the
/// handle returned here. A cancelled handle must never fire again.
pub trait TimerService {
    /// Arms a timer that fires every `period`, first fire one period from now.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Disarms a timer.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<T: TimerService + ?Sized> TimerService for &mut T {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        (**self).schedule_repeating(period)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}
