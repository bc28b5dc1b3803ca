//! Task use-case service.
//!
//! # Responsibility
//! - Validate creation input, derive the summary and persist the task.
//! - Provide delete, lookup, filtered listing and the dashboard snapshot.
//!
//! # Invariants
//! - Nothing is written when validation fails.
//! - The summary is computed before the insert, so a stored task always has
//!   one.
//! - Every repository failure is classified into a `ServiceError` kind.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{TaskFilter, TaskRepository};
use crate::repo::RepoError;
use crate::service::dashboard::DashboardSnapshot;
use crate::service::error::ServiceError;
use crate::summarizer::summarize;
use log::{error, info};

/// Use-case service for task create/delete/list operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `input`, summarizes its content and stores the task.
    ///
    /// Returns the stored task with its assigned id and creation time.
    pub fn create_task(&self, input: &NewTask) -> Result<Task, ServiceError> {
        let draft = input.validate().map_err(|err| {
            info!(
                "event=task_create module=service status=rejected reason={}",
                err
            );
            ServiceError::from(err)
        })?;

        let summary = summarize(&draft.content);
        match self.repo.create_task(&draft, &summary) {
            Ok(task) => {
                info!(
                    "event=task_create module=service status=ok task_id={} priority={} status_value={}",
                    task.id,
                    task.priority.as_db(),
                    task.status.as_db()
                );
                Ok(task)
            }
            Err(err) => {
                error!(
                    "event=task_create module=service status=error error={}",
                    err
                );
                Err(ServiceError::Storage(err))
            }
        }
    }

    /// Permanently deletes one task.
    ///
    /// A missing id yields `ServiceError::NotFound`; it is an ordinary
    /// outcome and is not logged as a fault.
    pub fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        match self.repo.delete_task(id) {
            Ok(()) => {
                info!("event=task_delete module=service status=ok task_id={id}");
                Ok(())
            }
            Err(err @ RepoError::NotFound { .. }) => {
                info!("event=task_delete module=service status=not_found task_id={id}");
                Err(err.into())
            }
            Err(err) => {
                error!(
                    "event=task_delete module=service status=error task_id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }

    /// Gets one task by id.
    pub fn get_task(&self, id: TaskId) -> Result<Task, ServiceError> {
        self.repo
            .get_task(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("task not found: {id}")))
    }

    /// Lists tasks matching `filter`, ordered by id.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError> {
        Ok(self.repo.list_tasks(filter)?)
    }

    /// Builds dashboard metrics, breakdowns and recent activity over all tasks.
    pub fn dashboard(&self) -> Result<DashboardSnapshot, ServiceError> {
        let tasks = self.repo.list_tasks(&TaskFilter::default())?;
        Ok(DashboardSnapshot::from_tasks(&tasks))
    }
}
