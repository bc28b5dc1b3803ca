//! Human-readable rendering for command results.

use chrono::{Local, TimeZone};
use taskpro_core::{DashboardSnapshot, ServiceError, Severity, Task, WeatherLog, WeatherReport};

const TITLE_WIDTH: usize = 32;

pub fn print_task(task: &Task) {
    println!("#{} {}", task.id, task.title);
    println!("  status:   {}", task.status);
    println!("  priority: {}", task.priority);
    if let Some(due) = task.due_date {
        println!("  due:      {due}");
    }
    println!("  created:  {}", format_millis(task.created_at));
    println!("  summary:  {}", task.summary);
    println!();
    println!("{}", task.content);
}

pub fn print_task_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    println!(
        "{:>5}  {:<TITLE_WIDTH$}  {:<11}  {:<8}  {}",
        "ID", "TITLE", "STATUS", "PRIORITY", "DUE"
    );
    for task in tasks {
        let due = task
            .due_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<TITLE_WIDTH$}  {:<11}  {:<8}  {}",
            task.id,
            truncate(&task.title, TITLE_WIDTH),
            task.status.label(),
            task.priority.label(),
            due
        );
    }
}

pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    let metrics = &snapshot.metrics;
    println!("Total tasks:          {}", metrics.total);
    println!("Pending:              {}", metrics.pending);
    println!("Completed:            {}", metrics.completed);
    println!("High priority (open): {}", metrics.high_priority_open);

    println!();
    println!("By status:");
    for (status, count) in &snapshot.by_status {
        println!("  {:<11} {count}", status.label());
    }
    println!("By priority:");
    for (priority, count) in &snapshot.by_priority {
        println!("  {:<11} {count}", priority.label());
    }

    println!();
    println!("Recent activity:");
    if snapshot.recent.is_empty() {
        println!("  (none)");
    }
    for task in &snapshot.recent {
        println!(
            "  {}  #{} {} [{}]",
            format_millis(task.created_at),
            task.id,
            truncate(&task.title, TITLE_WIDTH),
            task.status
        );
    }
}

pub fn print_weather(city: &str, report: &WeatherReport) {
    println!("{city}: {} {}", report.temperature, report.condition);
    println!("Source: {}", report.source);
}

pub fn print_weather_history(logs: &[WeatherLog]) {
    if logs.is_empty() {
        println!("No weather lookups yet.");
        return;
    }
    for log in logs {
        println!(
            "{:>5}  {}  {}  {} {}",
            log.id,
            format_millis(log.timestamp),
            log.city,
            log.temperature,
            log.condition
        );
    }
}

/// Prints `{status}: {message}` to stderr, prefixed by severity.
pub fn print_error(err: &ServiceError) {
    let prefix = match err.severity() {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    eprintln!("{prefix} {}: {err}", err.status_code());
}

fn format_millis(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
