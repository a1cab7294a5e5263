//! Task export as CSV.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::{Priority, Task};

const CSV_HEADER: [&str; 5] = ["Title", "Description", "Deadline", "Priority", "Status"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("{0} export would be implemented with a backend service")]
    Unsupported(ExportFormat),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("CSV"),
            ExportFormat::Pdf => f.write_str("PDF"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// A finished export, ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Export tasks in the given format. Only CSV is produced.
pub fn export(tasks: &[Task], format: ExportFormat, today: NaiveDate) -> Result<ExportFile, ExportError> {
    match format {
        ExportFormat::Csv => Ok(ExportFile {
            filename: export_filename(today),
            content_type: "text/csv;charset=utf-8",
            body: to_csv(tasks),
        }),
        ExportFormat::Pdf => Err(ExportError::Unsupported(format)),
    }
}

/// Header line unquoted, every data cell double-quoted, rows joined with `\n`
pub fn to_csv(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for task in tasks {
        let deadline = task.deadline.format("%Y-%m-%d").to_string();
        let row = [
            task.title.as_str(),
            task.description.as_str(),
            deadline.as_str(),
            task.priority.as_str(),
            task.status_label(),
        ];
        lines.push(row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("tasks-export-{}.csv", today.format("%Y-%m-%d"))
}

/// Counts shown next to the export button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub urgent: usize,
}

pub fn export_summary(tasks: &[Task]) -> ExportSummary {
    let completed = tasks.iter().filter(|t| t.completed).count();
    let urgent = tasks
        .iter()
        .filter(|t| t.priority == Priority::Urgent && !t.completed)
        .count();
    ExportSummary {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        urgent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn make_task(title: &str, description: &str, priority: Priority, completed: bool) -> Task {
        Task {
            id: title.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            deadline: at(15, 23),
            priority,
            completed,
            created_at: at(10, 8),
            updated_at: at(10, 8),
        }
    }

    // ========== to_csv tests ==========

    #[test]
    fn test_to_csv_empty() {
        assert_eq!(to_csv(&[]), "Title,Description,Deadline,Priority,Status");
    }

    #[test]
    fn test_to_csv_rows() {
        let tasks = vec![
            make_task("Essay", "1500 words", Priority::Medium, false),
            make_task("Lab", "", Priority::Urgent, true),
        ];
        let csv = to_csv(&tasks);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#""Essay","1500 words","2025-05-15","medium","Pending""#);
        assert_eq!(lines[2], r#""Lab","","2025-05-15","urgent","Completed""#);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_to_csv_escapes_quotes_and_keeps_commas() {
        let tasks = vec![make_task(
            "Read \"Hamlet\"",
            "Acts 1, 2 and 3",
            Priority::Low,
            false,
        )];
        let csv = to_csv(&tasks);
        assert!(csv.ends_with(r#""Read ""Hamlet""","Acts 1, 2 and 3","2025-05-15","low","Pending""#));
    }

    // ========== export tests ==========

    #[test]
    fn test_export_csv_file() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let file = export(&[], ExportFormat::Csv, today).unwrap();
        assert_eq!(file.filename, "tasks-export-2025-05-20.csv");
        assert!(file.content_type.starts_with("text/csv"));
    }

    #[test]
    fn test_export_pdf_unsupported() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let err = export(&[], ExportFormat::Pdf, today).unwrap_err();
        assert_eq!(err, ExportError::Unsupported(ExportFormat::Pdf));
        assert!(err.to_string().starts_with("PDF export"));
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    // ========== export_summary tests ==========

    #[test]
    fn test_export_summary() {
        let tasks = vec![
            make_task("a", "", Priority::Urgent, false),
            make_task("b", "", Priority::Urgent, true),
            make_task("c", "", Priority::Low, false),
        ];
        assert_eq!(
            export_summary(&tasks),
            ExportSummary {
                total: 3,
                completed: 1,
                pending: 2,
                urgent: 1
            }
        );
    }
}
