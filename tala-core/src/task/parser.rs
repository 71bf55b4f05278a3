use crate::task::Task;

/// One parsed line of user input.
///
/// Each variant carries its arguments already split into place, so the
/// session never re-tokenizes. Index arguments stay raw strings here;
/// numeric validation happens in the session, not the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Mark(String),
    Unmark(String),
    Todo(String),
    Deadline { description: String, by: String },
    Event { description: String, from: String, to: String },
    Delete(String),
    Find(String),
    Help,
    Bye,
    Invalid,
}

/// Parse a raw input line (total — anything unrecognized is `Invalid`).
pub fn parse(raw: &str) -> Command {
    let line = raw.trim();
    if line.is_empty() {
        return Command::Invalid;
    }

    let (keyword, rest) = match line.split_once(' ') {
        Some((k, r)) => (k, r),
        None => (line, ""),
    };

    match keyword {
        "list" if rest.is_empty() => Command::List,
        "bye" if rest.is_empty() => Command::Bye,
        "help" if rest.is_empty() => Command::Help,
        "mark" if !rest.is_empty() => Command::Mark(rest.trim().to_string()),
        "unmark" if !rest.is_empty() => Command::Unmark(rest.trim().to_string()),
        "delete" if !rest.is_empty() => Command::Delete(rest.trim().to_string()),
        "todo" if !rest.is_empty() => Command::Todo(rest.to_string()),
        // Splits use first-occurrence semantics: a description containing
        // " /by " or " /from " truncates at the first delimiter.
        "deadline" => match rest.split_once(" /by ") {
            Some((description, by)) => Command::Deadline {
                description: description.to_string(),
                by: by.to_string(),
            },
            None => Command::Invalid,
        },
        "event" => match rest.split_once(" /from ") {
            Some((description, tail)) => match tail.split_once(" /to ") {
                Some((from, to)) => Command::Event {
                    description: description.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                },
                None => Command::Invalid,
            },
            None => Command::Invalid,
        },
        // Empty keyword is allowed through so the session can demand one.
        "find" => Command::Find(rest.to_string()),
        _ => Command::Invalid,
    }
}

/// Build a task from an add-command. Returns `None` for every other
/// command type; never validates dates beyond what task construction does.
pub fn create_task(command: &Command) -> Option<Task> {
    match command {
        Command::Todo(description) => Some(Task::todo(description.clone())),
        Command::Deadline { description, by } => Some(Task::deadline(description.clone(), by)),
        Command::Event {
            description,
            from,
            to,
        } => Some(Task::event(description.clone(), from, to)),
        _ => None,
    }
}
