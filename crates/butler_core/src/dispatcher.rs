//! Command dispatcher.
//!
//! # Responsibility
//! - Own the session task list and its store.
//! - Apply validated commands and render one response per input line.
//!
//! # Invariants
//! - Rejected commands never mutate the list and never reach the store.
//! - Every successful mutating command is followed by exactly one save.
//! - Save failures are logged and swallowed; the in-memory list stays
//!   authoritative for the rest of the session.
//! - After `bye`, further input is ignored.

use crate::model::task::Task;
use crate::parser::{parse, Command, CommandError};
use crate::storage::TaskStore;
use crate::task_list::TaskList;
use log::{debug, error, info};

const BYE_MESSAGE: &str = "Bye. Hope to see you again soon!";
const LIST_HEADER: &str = "Here are the tasks in your list:";
const FIND_HEADER: &str = "Here are the matching tasks in your list:";
const FIND_EMPTY: &str = " (no matching tasks found)";

/// Text block produced for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Rendered verbatim by the shell; empty for blank input.
    pub text: String,
    /// Set once the session has ended.
    pub is_exit: bool,
}

impl Response {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_exit: false,
        }
    }

    fn exit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_exit: true,
        }
    }
}

/// Session context: one task list, one store.
pub struct Butler<S: TaskStore> {
    store: S,
    tasks: TaskList,
    finished: bool,
}

impl<S: TaskStore> Butler<S> {
    /// Creates a session seeded from `store`.
    pub fn new(store: S) -> Self {
        let tasks = store.load();
        Self::with_tasks(store, tasks)
    }

    /// Creates a session over an already loaded list.
    pub fn with_tasks(store: S, tasks: TaskList) -> Self {
        Self {
            store,
            tasks,
            finished: false,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Handles one raw input line.
    ///
    /// Failures come back as their user-facing message; nothing here panics
    /// or ends the process.
    pub fn respond(&mut self, input: &str) -> Response {
        if self.finished {
            return Response::exit("");
        }
        if input.trim().is_empty() {
            return Response::reply("");
        }

        match parse(input, self.tasks.size()).and_then(|command| self.execute(command)) {
            Ok(response) => response,
            Err(err) => {
                info!(
                    "event=command module=dispatcher status=error reason={}",
                    err.code()
                );
                Response::reply(err.to_string())
            }
        }
    }

    /// Applies a command parsed against the current list size.
    ///
    /// Indexes are trusted; `parse` has already range-checked them.
    ///
    /// # Errors
    /// - `CommandError::Task` when the task rules reject the values.
    fn execute(&mut self, command: Command) -> Result<Response, CommandError> {
        let keyword = command.keyword();
        let is_mutating = command.is_mutating();

        let response = match command {
            Command::Bye => {
                self.finished = true;
                Response::exit(BYE_MESSAGE)
            }
            Command::List => Response::reply(render_list(LIST_HEADER, self.tasks.all().iter())),
            Command::Todo { description } => self.add(Task::todo(description)?),
            Command::Deadline { description, by } => self.add(Task::deadline(description, by)?),
            Command::Event {
                description,
                from,
                to,
            } => self.add(Task::event(description, from, to)?),
            Command::Mark { index } => {
                let task = self.tasks.get_mut(index);
                task.mark();
                Response::reply(format!("Nice! I've marked this task as done:\n   {task}"))
            }
            Command::Unmark { index } => {
                let task = self.tasks.get_mut(index);
                task.unmark();
                Response::reply(format!(
                    "OK, I've marked this task as not done yet:\n   {task}"
                ))
            }
            Command::Delete { index } => {
                let removed = self.tasks.remove(index);
                Response::reply(format!(
                    "Noted. I've removed this task:\n   {removed}\n Now you have {} tasks in the list.",
                    self.tasks.size()
                ))
            }
            Command::Find { keyword } => {
                let matches = self.tasks.find_by_description_contains(&keyword);
                if matches.is_empty() {
                    Response::reply(format!("{FIND_HEADER}\n{FIND_EMPTY}"))
                } else {
                    Response::reply(render_list(FIND_HEADER, matches.into_iter()))
                }
            }
            Command::Reschedule { index, schedule } => {
                let task = self.tasks.get_mut(index);
                task.reschedule(schedule)?;
                Response::reply(format!("Got it. I've rescheduled this task:\n   {task}"))
            }
        };

        debug!("event=command module=dispatcher status=ok command={keyword}");
        if is_mutating {
            self.persist();
        }
        Ok(response)
    }

    fn add(&mut self, task: Task) -> Response {
        let rendered = task.to_string();
        self.tasks.add(task);
        Response::reply(format!(
            "Got it. I've added this task:\n   {rendered}\nNow you have {} tasks in the list.",
            self.tasks.size()
        ))
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.tasks) {
            error!(
                "event=storage_save module=dispatcher status=error count={} error={}",
                self.tasks.size(),
                err
            );
        }
    }
}

fn render_list<'a>(header: &str, tasks: impl Iterator<Item = &'a Task>) -> String {
    let mut text = header.to_string();
    for (idx, task) in tasks.enumerate() {
        text.push_str(&format!("\n {}.{}", idx + 1, task));
    }
    text
}
