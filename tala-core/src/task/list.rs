use crate::task::Task;

/// Ordered in-memory task collection. Insertion order is display order.
///
/// Indices here are 0-based; the session translates the user's 1-based
/// numbers and bounds-checks before calling any mutating method.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList { tasks: Vec::new() }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Append a task at the end of the list.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the task at `index`. Callers bounds-check first;
    /// an out-of-range index is a contract violation and panics.
    pub fn remove(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    /// Tasks whose rendered line contains `keyword` as a literal
    /// (case-sensitive) substring, in original order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.to_string().contains(keyword))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}
