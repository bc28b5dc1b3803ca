//! Dashboard aggregation over an in-memory task collection.

use crate::model::task::{Priority, Task, TaskStatus};

/// Number of tasks shown in the recent activity list.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Headline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total: usize,
    /// `total - completed`.
    pub pending: usize,
    /// Tasks with status `Done`.
    pub completed: usize,
    /// High priority tasks that are not `Done`.
    pub high_priority_open: usize,
}

impl DashboardMetrics {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.status.is_done()).count();
        let high_priority_open = tasks
            .iter()
            .filter(|task| task.priority == Priority::High && !task.status.is_done())
            .count();

        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
            high_priority_open,
        }
    }
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub metrics: DashboardMetrics,
    pub by_status: Vec<(TaskStatus, usize)>,
    pub by_priority: Vec<(Priority, usize)>,
    pub recent: Vec<Task>,
}

impl DashboardSnapshot {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            metrics: DashboardMetrics::from_tasks(tasks),
            by_status: status_breakdown(tasks),
            by_priority: priority_breakdown(tasks),
            recent: recent_activity(tasks, RECENT_ACTIVITY_LIMIT),
        }
    }
}

/// Count per status, every status listed in declaration order.
pub fn status_breakdown(tasks: &[Task]) -> Vec<(TaskStatus, usize)> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let count = tasks.iter().filter(|task| task.status == status).count();
            (status, count)
        })
        .collect()
}

/// Count per priority in `Low, Medium, High` order.
pub fn priority_breakdown(tasks: &[Task]) -> Vec<(Priority, usize)> {
    Priority::ALL
        .into_iter()
        .map(|priority| {
            let count = tasks.iter().filter(|task| task.priority == priority).count();
            (priority, count)
        })
        .collect()
}

/// Newest tasks first by `created_at`, ties broken by higher id.
pub fn recent_activity(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted.into_iter().take(limit).cloned().collect()
}
