use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Deferred work the session asks to be called back with.
///
/// Tasks carry the generation of the game that scheduled them, a task from a previous game is
/// recognised as stale and dropped even if its cancellation raced with firing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    Tick { generation: u64 },
    RevertMismatch { generation: u64 },
}

impl Task {
    pub const fn generation(self) -> u64 {
        match self {
            Self::Tick { generation } | Self::RevertMismatch { generation } => generation,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

/// One-shot timer capability. A fired task must be handed back to
/// [`GameSession::on_task`](crate::GameSession::on_task).
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle;

    /// Cancelling an unknown or already fired handle does nothing.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Deterministic fake clock: tasks only fire when time is advanced explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: u64,
    pending: BTreeMap<(u64, TaskHandle), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = Task> + '_ {
        self.pending.values().copied()
    }

    /// Removes the earliest task due at or before `until_ms` and moves the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let (&(due_ms, handle), _) = self.pending.first_key_value()?;
        if due_ms > until_ms {
            return None;
        }
        let task = self.pending.remove(&(due_ms, handle))?;
        self.now_ms = self.now_ms.max(due_ms);
        Some(task)
    }

    /// Moves the clock forward and returns every task that came due, in firing order.
    ///
    /// Tasks scheduled by the caller while handling the result are not included, use
    /// [`GameSession::advance_time`](crate::GameSession::advance_time) to drive a session.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<Task> {
        let until_ms = self.now_ms.saturating_add(delta_ms);
        let fired = core::iter::from_fn(|| self.pop_due(until_ms)).collect();
        self.now_ms = until_ms;
        fired
    }

    pub(crate) fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let due_ms = self.now_ms.saturating_add(u64::from(delay_ms));
        self.pending.insert((due_ms, handle), task);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|&(_, pending), _| pending != handle);
    }
}
