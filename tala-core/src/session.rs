use crate::task::{create_task, parse, parse_date, Command, Storage, TaskList};

const GREETING: &str = "Hello! I'm Tala\nWhat can I do for you?";
const FAREWELL: &str = "Bye. Hope to see you again soon!";
const LOADING_ERROR: &str = "Oops! Something went wrong while loading your tasks.";
const INVALID_COMMAND: &str = "Sorry, I didn't understand that command. Please try again!";
const INVALID_NUMBER: &str = "Please enter a valid task number.";
const INVALID_NUMBER_DELETE: &str = "Please enter a valid task number to delete.";
const NO_SUCH_TASK: &str = "Sorry, that task number does not exist.";

/// The rendered response to one input line, plus whether the driving
/// loop should stop reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub exit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            exit: false,
        }
    }
}

/// One conversational session: the task list plus its backing store.
///
/// `handle` is the single entry point — effectively
/// `(state, raw line) -> (state', rendered text)` — so the console loop
/// and any one-shot front end are both thin adapters around it.
pub struct Session {
    tasks: TaskList,
    storage: Storage,
}

impl Session {
    /// Open a session against `storage`, loading whatever it holds.
    ///
    /// A read failure falls back to an empty list; the warning is
    /// returned once for the caller to render, and the session continues.
    pub fn open(storage: Storage) -> (Self, Option<String>) {
        let (tasks, warning) = match storage.load() {
            Ok(tasks) => (TaskList::from_tasks(tasks), None),
            Err(_) => (TaskList::new(), Some(LOADING_ERROR.to_string())),
        };
        (Session { tasks, storage }, warning)
    }

    pub fn greeting() -> &'static str {
        GREETING
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Process one raw input line and produce the response text.
    pub fn handle(&mut self, line: &str) -> Reply {
        let command = parse(line);
        match &command {
            Command::List => self.list(),
            Command::Mark(arg) => self.set_done(arg, true),
            Command::Unmark(arg) => self.set_done(arg, false),
            Command::Todo(_) => self.add(&command),
            Command::Deadline { by, .. } => {
                if parse_date(by).is_none() {
                    return Reply::text(
                        "Invalid date format for deadline. Please use YYYY-MM-DD.",
                    );
                }
                self.add(&command)
            }
            Command::Event { from, to, .. } => {
                let from_date = match parse_date(from) {
                    Some(d) => d,
                    None => {
                        return Reply::text("Invalid start date for event. Expected yyyy-MM-dd.")
                    }
                };
                let to_date = match parse_date(to) {
                    Some(d) => d,
                    None => {
                        return Reply::text("Invalid end date for event. Expected yyyy-MM-dd.")
                    }
                };
                if to_date < from_date {
                    return Reply::text("End date cannot be before start date for an event.");
                }
                self.add(&command)
            }
            Command::Delete(arg) => self.delete(arg),
            Command::Find(keyword) => self.find(keyword),
            Command::Help => Reply::text(help_text()),
            Command::Bye => Reply {
                text: FAREWELL.to_string(),
                exit: true,
            },
            Command::Invalid => Reply::text(INVALID_COMMAND),
        }
    }

    fn list(&self) -> Reply {
        let mut out = String::from("Here are the tasks in your list:");
        for (i, task) in self.tasks.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, task));
        }
        Reply::text(out)
    }

    /// Translate a 1-based user index, bounds-checking against the list.
    fn resolve_index(&self, arg: &str) -> Result<usize, &'static str> {
        let number: usize = arg.parse().map_err(|_| INVALID_NUMBER)?;
        if number < 1 || number > self.tasks.len() {
            return Err(NO_SUCH_TASK);
        }
        Ok(number - 1)
    }

    fn set_done(&mut self, arg: &str, done: bool) -> Reply {
        let index = match self.resolve_index(arg) {
            Ok(i) => i,
            Err(message) => return Reply::text(message),
        };
        let task = match self.tasks.get_mut(index) {
            Some(task) => task,
            None => return Reply::text(NO_SUCH_TASK),
        };
        let text = if done {
            task.mark_done();
            format!(
                "Nice! I've marked this task as done:\n  [X] {}",
                task.description()
            )
        } else {
            task.mark_undone();
            format!(
                "OK, I've marked this task as not done yet:\n  [ ] {}",
                task.description()
            )
        };
        self.persist(text)
    }

    fn add(&mut self, command: &Command) -> Reply {
        let task = match create_task(command) {
            Some(task) => task,
            None => return Reply::text("Invalid task format."),
        };
        let text = format!(
            "Got it. I've added this task:\n  {}\nNow you have {} tasks in the list.",
            task,
            self.tasks.len() + 1
        );
        self.tasks.push(task);
        self.persist(text)
    }

    fn delete(&mut self, arg: &str) -> Reply {
        let index = match self.resolve_index(arg) {
            Ok(i) => i,
            Err(message) if message == INVALID_NUMBER => {
                return Reply::text(INVALID_NUMBER_DELETE)
            }
            Err(message) => return Reply::text(message),
        };
        let removed = self.tasks.remove(index);
        let text = format!(
            "Noted. I've removed this task:\n  {}\nNow you have {} tasks in the list.",
            removed,
            self.tasks.len()
        );
        self.persist(text)
    }

    fn find(&self, keyword: &str) -> Reply {
        if keyword.is_empty() {
            return Reply::text("OOPS!!! The find command requires a keyword.");
        }
        let matches = self.tasks.find(keyword);
        if matches.is_empty() {
            return Reply::text("No matching tasks found.");
        }
        let mut out = String::from("Here are the matching tasks in your list:");
        for (i, task) in matches.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, task));
        }
        Reply::text(out)
    }

    /// Write the full list to the store. A failed write is reported in
    /// the reply but never aborts the session; memory stays authoritative.
    fn persist(&self, text: String) -> Reply {
        match self.storage.save(self.tasks.iter()) {
            Ok(()) => Reply::text(text),
            Err(e) => Reply::text(format!("{text}\nError saving tasks: {e}")),
        }
    }
}

fn help_text() -> String {
    [
        "Tala Help:",
        "Available commands:",
        "1. list               - Show all tasks",
        "2. mark <num>         - Mark a task as done",
        "3. unmark <num>       - Mark a task as not done",
        "4. todo <desc>        - Add a ToDo task",
        "5. deadline <desc> /by <date> - Add a Deadline task",
        "6. event <desc> /from <start> /to <end> - Add an Event task",
        "7. delete <num>       - Delete a task",
        "8. find <keyword>     - Search tasks",
        "9. bye                - Exit",
        "10. help              - Show this help message",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        let storage = Storage::new(dir.path().join("data").join("tala.txt"));
        let (session, warning) = Session::open(storage);
        assert!(warning.is_none());
        session
    }

    #[test]
    fn full_scenario_add_mark_delete() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.handle("todo Write report");
        assert_eq!(
            reply.text,
            "Got it. I've added this task:\n  [T][ ] Write report\nNow you have 1 tasks in the list."
        );

        let reply = session.handle("list");
        assert_eq!(
            reply.text,
            "Here are the tasks in your list:\n1. [T][ ] Write report"
        );

        session.handle("mark 1");
        let reply = session.handle("list");
        assert_eq!(
            reply.text,
            "Here are the tasks in your list:\n1. [T][X] Write report"
        );

        session.handle("delete 1");
        let reply = session.handle("list");
        assert_eq!(reply.text, "Here are the tasks in your list:");
    }

    #[test]
    fn mark_reports_confirmation_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.handle("todo Write report");

        let reply = session.handle("mark 1");
        assert_eq!(
            reply.text,
            "Nice! I've marked this task as done:\n  [X] Write report"
        );

        let content = fs::read_to_string(dir.path().join("data").join("tala.txt")).unwrap();
        assert_eq!(content, "T | 1 | Write report\n");
    }

    #[test]
    fn unmark_reports_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.handle("todo Write report");
        session.handle("mark 1");

        let reply = session.handle("unmark 1");
        assert_eq!(
            reply.text,
            "OK, I've marked this task as not done yet:\n  [ ] Write report"
        );
    }

    #[test]
    fn mark_boundary_errors_leave_list_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.handle("todo Write report");

        assert_eq!(session.handle("mark 0").text, NO_SUCH_TASK);
        assert_eq!(session.handle("mark 2").text, NO_SUCH_TASK);
        assert_eq!(session.handle("mark abc").text, INVALID_NUMBER);
        assert_eq!(session.tasks().len(), 1);
        assert!(!session.tasks().get(0).unwrap().is_done());
    }

    #[test]
    fn mark_on_empty_list_errors() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert_eq!(session.handle("mark 1").text, NO_SUCH_TASK);
    }

    #[test]
    fn delete_uses_its_own_invalid_number_message() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.handle("todo Write report");

        assert_eq!(session.handle("delete abc").text, INVALID_NUMBER_DELETE);
        assert_eq!(session.handle("delete 5").text, NO_SUCH_TASK);
        assert_eq!(session.tasks().len(), 1);
    }

    #[test]
    fn deadline_with_invalid_date_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.handle("deadline Submit /by 2025-13-40");
        assert_eq!(
            reply.text,
            "Invalid date format for deadline. Please use YYYY-MM-DD."
        );
        assert_eq!(session.tasks().len(), 0);
    }

    #[test]
    fn event_date_validation_messages() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.handle("event Conf /from bad /to 2025-09-03");
        assert_eq!(
            reply.text,
            "Invalid start date for event. Expected yyyy-MM-dd."
        );

        let reply = session.handle("event Conf /from 2025-09-01 /to bad");
        assert_eq!(
            reply.text,
            "Invalid end date for event. Expected yyyy-MM-dd."
        );

        let reply = session.handle("event Conf /from 2025-09-03 /to 2025-09-01");
        assert_eq!(
            reply.text,
            "End date cannot be before start date for an event."
        );
        assert_eq!(session.tasks().len(), 0);
    }

    #[test]
    fn event_same_day_is_allowed() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let reply = session.handle("event Conf /from 2025-09-01 /to 2025-09-01");
        assert!(reply.text.starts_with("Got it."));
        assert_eq!(session.tasks().len(), 1);
    }

    #[test]
    fn find_matches_in_order() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.handle("todo Buy milk");
        session.handle("todo Read book");
        session.handle("todo Buy eggs");

        let reply = session.handle("find Buy");
        assert_eq!(
            reply.text,
            "Here are the matching tasks in your list:\n1. [T][ ] Buy milk\n2. [T][ ] Buy eggs"
        );

        assert_eq!(session.handle("find xyz").text, "No matching tasks found.");
        assert_eq!(
            session.handle("find").text,
            "OOPS!!! The find command requires a keyword."
        );
    }

    #[test]
    fn bye_sets_exit_and_nothing_else_does() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert!(!session.handle("list").exit);
        let reply = session.handle("bye");
        assert_eq!(reply.text, FAREWELL);
        assert!(reply.exit);
    }

    #[test]
    fn invalid_command_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert_eq!(session.handle("blah blah").text, INVALID_COMMAND);
    }

    #[test]
    fn help_lists_every_command() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let text = session.handle("help").text;
        for cmd in &["list", "mark", "unmark", "todo", "deadline", "event", "delete", "find", "bye"] {
            assert!(text.contains(cmd), "help should mention '{cmd}'");
        }
    }

    #[test]
    fn session_reopens_with_persisted_tasks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("tala.txt");
        {
            let (mut session, _) = Session::open(Storage::new(&path));
            session.handle("todo Write report");
            session.handle("deadline Submit /by 2025-08-30");
            session.handle("mark 1");
        }
        let (session, warning) = Session::open(Storage::new(&path));
        assert!(warning.is_none());
        assert_eq!(session.tasks().len(), 2);
        assert!(session.tasks().get(0).unwrap().is_done());
        assert_eq!(
            session.tasks().get(1).unwrap().to_string(),
            "[D][ ] Submit (by: Aug 30 2025)"
        );
    }

    #[test]
    fn save_failure_is_reported_but_not_fatal() {
        let dir = TempDir::new().unwrap();
        // Parent "directory" is a plain file, so the save must fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let storage = Storage::new(blocker.join("tala.txt"));
        let (mut session, _) = Session::open(storage);

        let reply = session.handle("todo Write report");
        assert!(reply.text.starts_with("Got it."));
        assert!(reply.text.contains("Error saving tasks:"));
        // In-memory state stays authoritative.
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(
            session.handle("list").text,
            "Here are the tasks in your list:\n1. [T][ ] Write report"
        );
    }

    #[test]
    fn corrupted_store_lines_do_not_block_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tala.txt");
        fs::write(&path, "T | 1 | good\nnot a record\n").unwrap();
        let (session, warning) = Session::open(Storage::new(&path));
        assert!(warning.is_none());
        assert_eq!(session.tasks().len(), 1);
    }
}
