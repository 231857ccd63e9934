//! Scheduler - one-shot and repeating tasks driven by elapsed time.
//!
//! Tasks carry a small `Copy` tag chosen by the owner. [`Scheduler::advance`]
//! moves the clock forward and returns the tags of every task that came due,
//! in due-time order. A repeating task fires once per whole interval elapsed,
//! so a long stall produces several firings rather than one.
//!
//! Cancelling is idempotent: cancelling an unknown, already-fired or
//! already-cancelled task is a no-op.

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy)]
struct Task<T> {
    id: TaskId,
    tag: T,
    due_ms: u64,
    /// `Some(interval)` for repeating tasks.
    every_ms: Option<u64>,
}

/// Single-threaded task scheduler.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current scheduler clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Schedule `tag` to fire once after `delay_ms`.
    pub fn schedule_once(&mut self, delay_ms: u32, tag: T) -> TaskId {
        self.push(tag, delay_ms as u64, None)
    }

    /// Schedule `tag` to fire every `interval_ms` until cancelled.
    ///
    /// A zero interval is treated as 1ms so `advance` always terminates.
    pub fn schedule_repeating(&mut self, interval_ms: u32, tag: T) -> TaskId {
        let every = (interval_ms as u64).max(1);
        self.push(tag, every, Some(every))
    }

    /// Cancel a task. Returns `true` if the task was still live.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every live task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Advance the clock by `elapsed_ms` and collect the tags that came due.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<(TaskId, T)> {
        let mut fired = Vec::new();
        self.advance_into(elapsed_ms, &mut fired);
        fired
    }

    /// Allocation-reusing variant of [`Scheduler::advance`]. `out` is cleared first.
    pub fn advance_into(&mut self, elapsed_ms: u32, out: &mut Vec<(TaskId, T)>) {
        out.clear();
        let target = self.now_ms.saturating_add(elapsed_ms as u64);

        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= target)
                .min_by_key(|(_, t)| (t.due_ms, t.id))
                .map(|(i, _)| i);

            let Some(i) = next else {
                break;
            };

            let task = self.tasks[i];
            self.now_ms = task.due_ms;
            out.push((task.id, task.tag));

            match task.every_ms {
                Some(every) => self.tasks[i].due_ms = task.due_ms + every,
                None => {
                    self.tasks.swap_remove(i);
                }
            }
        }

        self.now_ms = target;
    }

    fn push(&mut self, tag: T, delay_ms: u64, every_ms: Option<u64>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            tag,
            due_ms: self.now_ms + delay_ms,
            every_ms,
        });
        id
    }
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
