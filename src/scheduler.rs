use super::*;

/// Deferred page work. Every timer the page sets is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    RestoreCounterScale,
    ClearCartHighlight,
    HideSuccessBanner,
}

impl TimerTask {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::RestoreCounterScale => "restore-counter-scale",
            Self::ClearCartHighlight => "clear-cart-highlight",
            Self::HideSuccessBanner => "hide-success-banner",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub label: &'static str,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn schedule(&mut self, task: TimerTask, delay_ms: i64) -> ScheduledTask {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        let scheduled = ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            task,
        };
        self.task_queue.push(scheduled.clone());
        scheduled
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                label: task.task.label(),
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub(crate) fn step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        Error::Timer(format!(
            "flush exceeded max task steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}",
            self.timer_step_limit,
            self.now_ms,
            self.task_queue.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_order_by_due_time_then_insertion() {
        let mut scheduler = SchedulerState::default();
        scheduler.schedule(TimerTask::HideSuccessBanner, 5000);
        scheduler.schedule(TimerTask::ClearCartHighlight, 300);
        scheduler.schedule(TimerTask::RestoreCounterScale, 300);

        let labels = scheduler
            .pending()
            .into_iter()
            .map(|timer| timer.label)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                "clear-cart-highlight",
                "restore-counter-scale",
                "hide-success-banner"
            ]
        );
        assert_eq!(scheduler.next_task_index(Some(299)), None);
        assert_eq!(scheduler.next_task_index(Some(300)), Some(1));
    }

    #[test]
    fn due_time_saturates() {
        let mut scheduler = SchedulerState {
            now_ms: i64::MAX - 1,
            ..SchedulerState::default()
        };
        let task = scheduler.schedule(TimerTask::HideSuccessBanner, 5000);
        assert_eq!(task.due_at, i64::MAX);
    }
}
