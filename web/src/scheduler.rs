use std::collections::HashMap;
use std::fmt;

use gloo::timers::callback::Timeout;
use twinflip_core::{Scheduler, Task, TaskHandle};
use yew::Callback;

/// Browser timers as the engine's scheduler. Fired tasks come back through `callback`, usually as a
/// component message, and must be passed to [`WebScheduler::forget`] once handled.
pub(crate) struct WebScheduler {
    callback: Callback<(TaskHandle, Task)>,
    next_handle: u64,
    timeouts: HashMap<TaskHandle, Timeout>,
}

impl WebScheduler {
    pub(crate) fn new(callback: Callback<(TaskHandle, Task)>) -> Self {
        Self {
            callback,
            next_handle: 0,
            timeouts: HashMap::new(),
        }
    }

    /// Drops the bookkeeping of a timeout that already fired.
    pub(crate) fn forget(&mut self, handle: TaskHandle) {
        self.timeouts.remove(&handle);
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        let callback = self.callback.clone();
        let timeout = Timeout::new(delay_ms, move || callback.emit((handle, task)));
        self.timeouts.insert(handle, timeout);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        // dropping a gloo timeout clears it
        if self.timeouts.remove(&handle).is_some() {
            log::trace!("cancelled {:?}", handle);
        }
    }
}

impl fmt::Debug for WebScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebScheduler")
            .field("next_handle", &self.next_handle)
            .field("pending", &self.timeouts.len())
            .finish()
    }
}
