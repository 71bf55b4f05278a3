use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::task::{iso_date, Task, TaskKind};

/// Field separator in the store file. Records look like:
///
/// ```text
/// T | 1 | read book
/// D | 0 | submit report | 2025-08-30
/// E | 0 | conference | 2025-09-01 | 2025-09-03
/// ```
const DELIMITER: &str = " | ";

/// Flat-file persistence for the task list.
///
/// Every save is a whole-file rewrite, so the file is always a complete
/// snapshot after a successful write.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize all tasks to the store file, creating the parent
    /// directory if absent.
    pub fn save<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        let mut content = String::new();
        for task in tasks {
            content.push_str(&serialize_record(task));
            content.push('\n');
        }
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Load all tasks from the store file.
    ///
    /// A missing file yields an empty list. Lines that fail to parse are
    /// skipped; an unreadable existing file is an error the caller turns
    /// into a one-time warning.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(content.lines().filter_map(parse_record).collect())
    }
}

fn serialize_record(task: &Task) -> String {
    let done = if task.is_done() { "1" } else { "0" };
    let mut fields = vec![
        task.type_tag().to_string(),
        done.to_string(),
        task.description().to_string(),
    ];
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => fields.push(iso_date(by)),
        TaskKind::Event { from, to } => {
            fields.push(iso_date(from));
            fields.push(iso_date(to));
        }
    }
    fields.join(DELIMITER)
}

/// Parse one store line. Wrong field count or unknown tag yields `None`
/// so corrupted lines drop out of the load instead of failing it.
fn parse_record(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let done = match *fields.get(1)? {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    let mut task = match (fields[0], fields.len()) {
        ("T", 3) => Task::todo(fields[2]),
        ("D", 4) => Task::deadline(fields[2], fields[3]),
        ("E", 5) => Task::event(fields[2], fields[3], fields[4]),
        _ => return None,
    };
    if done {
        task.mark_done();
    }
    Some(task)
}
