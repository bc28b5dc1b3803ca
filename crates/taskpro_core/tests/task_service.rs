use rusqlite::Connection;
use taskpro_core::db::open_db_in_memory;
use taskpro_core::{
    summarize, DashboardMetrics, ErrorKind, NewTask, Priority, ServiceError, SqliteTaskRepository,
    TaskFilter, TaskService, TaskStatus,
};

fn with_service<T>(f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>, &Connection) -> T) -> T {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    f(&service, &conn)
}

fn task_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_stores_summary_of_content() {
    with_service(|service, conn| {
        let content = "Compile the Q4 numbers for finance. Then send them to the board.";
        let input = NewTask::new("Q4 Financial Report", content)
            .with_priority("High")
            .with_status("In Progress")
            .with_due_date("2026-11-30");

        let task = service.create_task(&input).unwrap();

        assert!(task.id > 0);
        assert_eq!(task.summary, summarize(content));
        assert!(task.summary.contains("Compile the Q4 numbers for finance."));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date.unwrap().to_string(), "2026-11-30");
        assert_eq!(task_count(conn), 1);
    });
}

#[test]
fn create_applies_defaults() {
    with_service(|service, _| {
        let task = service
            .create_task(&NewTask::new("Call plumber", "Leaky tap"))
            .unwrap();

        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.due_date, None);
        assert_eq!(task.summary, "Summary: Leaky tap (Short text)");
    });
}

#[test]
fn empty_title_or_content_is_rejected_without_writing() {
    with_service(|service, conn| {
        for input in [
            NewTask::new("", "content"),
            NewTask::new("   ", "content"),
            NewTask::new("title", ""),
        ] {
            let err = service.create_task(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.status_code(), 422);
        }
        assert_eq!(task_count(conn), 0);
    });
}

#[test]
fn invalid_enumerations_and_dates_are_rejected() {
    with_service(|service, conn| {
        let inputs = [
            NewTask::new("t", "c").with_priority("Urgent"),
            NewTask::new("t", "c").with_status("Blocked"),
            NewTask::new("t", "c").with_due_date("not-a-date"),
            NewTask::new("t", "c").with_due_date("2026-02-30"),
        ];
        for input in inputs {
            let err = service.create_task(&input).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{err}");
        }
        assert_eq!(task_count(conn), 0);
    });
}

#[test]
fn storage_failure_is_classified() {
    with_service(|service, conn| {
        conn.execute_batch("DROP TABLE tasks;").unwrap();

        let err = service
            .create_task(&NewTask::new("title", "content"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.status_code(), 500);
    });
}

#[test]
fn delete_existing_then_missing() {
    with_service(|service, _| {
        let task = service
            .create_task(&NewTask::new("Disposable", "content"))
            .unwrap();

        service.delete_task(task.id).unwrap();
        let remaining = service.list_tasks(&TaskFilter::default()).unwrap();
        assert!(remaining.iter().all(|item| item.id != task.id));

        let err = service.delete_task(task.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
    });
}

#[test]
fn delete_never_created_id_is_not_found() {
    with_service(|service, _| {
        let err = service.delete_task(999).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    });
}

#[test]
fn get_task_reports_missing_ids() {
    with_service(|service, _| {
        let err = service.get_task(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    });
}

#[test]
fn list_uses_status_priority_and_title_filters() {
    with_service(|service, _| {
        let create = |title: &str, priority: &str, status: &str| {
            service
                .create_task(
                    &NewTask::new(title, "content")
                        .with_priority(priority)
                        .with_status(status),
                )
                .unwrap()
        };
        let a = create("Deploy API", "High", "Todo");
        let b = create("Deploy web", "Low", "In Progress");
        create("Archive logs", "High", "Done");

        let open = TaskFilter::default().with_statuses([TaskStatus::Todo, TaskStatus::InProgress]);
        let ids: Vec<_> = service
            .list_tasks(&open)
            .unwrap()
            .into_iter()
            .map(|task| task.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);

        let deploy_high = TaskFilter::default()
            .with_priorities([Priority::High])
            .with_title_contains("Deploy");
        let matched = service.list_tasks(&deploy_high).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, a.id);
    });
}

#[test]
fn dashboard_counts_fixture_of_ten_tasks() {
    with_service(|service, conn| {
        let fixture = [
            ("Done", "High"),
            ("Done", "Low"),
            ("Done", "Medium"),
            ("Todo", "High"),
            ("In Progress", "High"),
            ("Todo", "Low"),
            ("Todo", "Medium"),
            ("In Progress", "Medium"),
            ("Todo", "Low"),
            ("In Progress", "Low"),
        ];
        for (index, (status, priority)) in fixture.iter().enumerate() {
            service
                .create_task(
                    &NewTask::new(format!("task {index}"), "content")
                        .with_status(*status)
                        .with_priority(*priority),
                )
                .unwrap();
        }
        conn.execute("UPDATE tasks SET created_at = id * 1000;", [])
            .unwrap();

        let snapshot = service.dashboard().unwrap();

        assert_eq!(
            snapshot.metrics,
            DashboardMetrics {
                total: 10,
                pending: 7,
                completed: 3,
                high_priority_open: 2,
            }
        );
        assert_eq!(
            snapshot.by_status,
            vec![
                (TaskStatus::Todo, 4),
                (TaskStatus::InProgress, 3),
                (TaskStatus::Done, 3)
            ]
        );
        assert_eq!(
            snapshot.by_priority,
            vec![(Priority::Low, 4), (Priority::Medium, 3), (Priority::High, 3)]
        );
        let recent: Vec<_> = snapshot.recent.iter().map(|task| task.id).collect();
        assert_eq!(recent, vec![10, 9, 8, 7, 6]);
    });
}

#[test]
fn dashboard_of_empty_store_is_all_zero() {
    with_service(|service, _| {
        let snapshot = service.dashboard().unwrap();
        assert_eq!(snapshot.metrics, DashboardMetrics::default());
        assert!(snapshot.recent.is_empty());
    });
}
