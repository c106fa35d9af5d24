//! Interactive numbered menu: one screen per cycle, one action per choice.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::app::App;
use crate::cli::output::{format_summary, format_task_line, format_task_table};
use crate::io::store_io::TaskFile;
use crate::model::session::SessionError;
use crate::model::task::TaskField;
use crate::ops::date::{self, TIMESTAMP_HINT};
use crate::ops::task_ops::TaskDraft;

const MENU_ITEMS: [&str; 8] = [
    "Add task",
    "Delete task",
    "Complete task",
    "Search by keyword",
    "Search by priority",
    "Sort tasks",
    "Reset view",
    "Exit",
];

enum Flow {
    Continue,
    Exit,
}

/// Run the menu on the terminal until the user exits or stdin closes.
pub fn run(file: TaskFile) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open(file);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    Menu {
        app: &mut app,
        input: &mut input,
        out: &mut out,
        clock: date::now,
        clear_screen: true,
    }
    .run()?;
    Ok(())
}

pub struct Menu<'a, R, W> {
    pub app: &'a mut App,
    pub input: &'a mut R,
    pub out: &'a mut W,
    pub clock: fn() -> NaiveDateTime,
    pub clear_screen: bool,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;
            let Some(choice) = self.prompt(&format!("Choose (1-{}): ", MENU_ITEMS.len()))? else {
                return Ok(());
            };
            let flow = match choice.trim() {
                "1" => self.add()?,
                "2" => self.delete()?,
                "3" => self.complete()?,
                "4" => self.search_keyword()?,
                "5" => self.search_priority()?,
                "6" => self.sort()?,
                "7" => {
                    self.app.session.reset();
                    Flow::Continue
                }
                "8" => {
                    writeln!(self.out, "Goodbye!")?;
                    Flow::Exit
                }
                _ => {
                    self.app
                        .error
                        .set("invalid choice, please pick one of the menu options");
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    /// Sweep overdue tasks, then print the whole screen.
    fn draw(&mut self) -> io::Result<()> {
        if let Err(e) = self.app.refresh(&(self.clock)()) {
            self.app.error.set(e.to_string());
        }
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        writeln!(self.out, "{:=^100}", " Todo List ")?;
        writeln!(self.out, "{}", format_summary(&self.app.summary()))?;
        if let Some(keyword) = &self.app.session.search_keyword {
            writeln!(self.out, "Search: {}", keyword)?;
        }
        if let Some(field) = self.app.session.sort_field {
            let dir = if self.app.session.sort_ascending { "asc" } else { "desc" };
            writeln!(self.out, "Sorted by: {} ({})", field, dir)?;
        }
        writeln!(self.out, "Tasks:")?;
        for line in format_task_table(&self.app.visible()) {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;

        writeln!(self.out, "{:=^30}", " Menu ")?;
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            writeln!(self.out, "\t{}. {}", i + 1, item)?;
        }
        writeln!(self.out, "{}", "=".repeat(30))?;

        if let Some(message) = self.app.error.take() {
            writeln!(self.out, "Error: {}", message)?;
        }
        Ok(())
    }

    /// Print `message` and read one line. `None` means input is closed.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn add(&mut self) -> io::Result<Flow> {
        let Some(task) = self.prompt("New task: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(due_date) = self.prompt(&format!("Due date ({}): ", TIMESTAMP_HINT))? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt("Category: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(priority) = self.prompt("Priority (1-5): ")? else {
            return Ok(Flow::Exit);
        };

        let draft = TaskDraft {
            task,
            category,
            priority,
            description,
            due_date,
        };
        if let Err(e) = self.app.add(draft, (self.clock)()) {
            self.app.error.set(e.to_string());
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_id("ID of the task to delete: ")? else {
            return Ok(Flow::Exit);
        };
        if let Some(id) = id
            && let Err(e) = self.app.delete(id)
        {
            self.app.error.set(e.to_string());
        }
        Ok(Flow::Continue)
    }

    fn complete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_id("ID of the completed task: ")? else {
            return Ok(Flow::Exit);
        };
        if let Some(id) = id
            && let Err(e) = self.app.complete(id)
        {
            self.app.error.set(e.to_string());
        }
        Ok(Flow::Continue)
    }

    /// Outer `None`: input closed. Inner `None`: not a number (error already set).
    fn read_id(&mut self, message: &str) -> io::Result<Option<Option<u64>>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };
        match text.trim().parse::<u64>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                self.app.error.set("task ID must be a number");
                Ok(Some(None))
            }
        }
    }

    fn search_keyword(&mut self) -> io::Result<Flow> {
        let Some(keyword) = self.prompt("Keyword to search for: ")? else {
            return Ok(Flow::Exit);
        };
        if let Err(e) = self.app.session.set_keyword(&keyword) {
            self.app.error.set(e.to_string());
        }
        Ok(Flow::Continue)
    }

    fn search_priority(&mut self) -> io::Result<Flow> {
        let Some(text) = self.prompt("Search tasks with priority (1-5): ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(priority) = text.trim().parse::<i64>() else {
            self.app.error.set("priority must be a number");
            return Ok(Flow::Continue);
        };

        let matches = self.app.by_priority(priority);
        if matches.is_empty() {
            writeln!(self.out, "No tasks found.")?;
        } else {
            writeln!(self.out, "\nTasks with priority {}:", priority)?;
            for task in &matches {
                writeln!(self.out, "{}", format_task_line(task))?;
            }
            writeln!(self.out, "Total: {} tasks", matches.len())?;
        }

        match self.prompt("Press Enter to continue...")? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Exit),
        }
    }

    fn sort(&mut self) -> io::Result<Flow> {
        let fields: Vec<String> = TaskField::ALL
            .iter()
            .enumerate()
            .map(|(i, f)| format!("[{}] {}", i + 1, f))
            .collect();
        writeln!(self.out, "{}", fields.join(" "))?;

        let Some(field) = self.prompt("Sort by which field (pick a number above)? ")? else {
            return Ok(Flow::Exit);
        };
        if field.trim().is_empty() {
            self.app.error.set(SessionError::EmptyChoice.to_string());
            return Ok(Flow::Continue);
        }
        let Some(ascending) = self.prompt("Sort ascending (y/n)? ")? else {
            return Ok(Flow::Exit);
        };
        if let Err(e) = self.app.session.set_sort(&field, &ascending) {
            self.app.error.set(e.to_string());
        }
        Ok(Flow::Continue)
    }
}
