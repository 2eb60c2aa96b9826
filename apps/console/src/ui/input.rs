//! Line-oriented command parsing for the console screens.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use shared::domain::AttendanceStatus;

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Show the employee screen
    Employees,
    /// Show the attendance screen
    Attendance,
    /// Create an employee; quote values containing spaces
    Add {
        employee_id: Option<String>,
        full_name: Option<String>,
        email: Option<String>,
        department: Option<String>,
    },
    /// Delete an employee by business id
    Delete { employee_id: String },
    /// Open an employee's attendance records
    View { employee_id: String },
    /// Change the attendance selection; no id clears it
    Select { employee_id: Option<String> },
    /// Mark attendance for a day
    Mark {
        employee_id: Option<String>,
        /// Calendar day as YYYY-MM-DD
        date: Option<NaiveDate>,
        #[arg(value_enum, default_value_t = StatusArg::Present)]
        status: StatusArg,
    },
    /// Reload the employee list
    Reload,
    /// Close the current notification
    Dismiss,
    /// Leave the application
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Present,
    Absent,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Present => Self::Present,
            StatusArg::Absent => Self::Absent,
        }
    }
}

/// `Ok(None)` for blank input; errors carry text ready to show the user,
/// including rendered help.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    ReplLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|err| err.render().to_string().trim_end().to_string())
}

/// Whitespace splitting with single or double quotes grouping words.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("unterminated {open} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
