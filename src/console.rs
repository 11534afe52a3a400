//! Line-oriented front end: turns typed lines into browser actions.
//!
//! Any line that doesn't start with `/` is search text, so typing a station name
//! filters the table the way the search box does. An empty line clears the search.

use crate::browser::StationBrowser;
use crate::error::SynopError;
use crate::stations::fetch::StationSource;
use crate::table::TableView;
use crate::types::column::Column;
use log::debug;
use std::io::{BufRead, Write};
use thiserror::Error;

const PROMPT: &str = "> ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command '{0}', type /help for the list of commands")]
    UnknownCommand(String),

    #[error("Unknown column '{0}', use a column key or its number (1-{max})", max = Column::ALL.len())]
    UnknownColumn(String),

    #[error("Command /{0} needs an argument")]
    MissingArgument(&'static str),
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    /// Same as clicking the column's header.
    Sort(Column),
    Show(String),
    Search(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ConsoleError> {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Command::Search(trimmed.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "r" | "refresh" => Ok(Command::Refresh),
            "h" | "help" => Ok(Command::Help),
            "q" | "quit" => Ok(Command::Quit),
            "s" | "sort" => {
                if argument.is_empty() {
                    return Err(ConsoleError::MissingArgument("sort"));
                }
                Column::from_key(argument)
                    .or_else(|| {
                        argument
                            .parse::<usize>()
                            .ok()
                            .and_then(Column::from_position)
                    })
                    .map(Command::Sort)
                    .ok_or_else(|| ConsoleError::UnknownColumn(argument.to_string()))
            }
            "show" => {
                if argument.is_empty() {
                    return Err(ConsoleError::MissingArgument("show"));
                }
                Ok(Command::Show(argument.to_string()))
            }
            _ => Err(ConsoleError::UnknownCommand(trimmed.to_string())),
        }
    }
}

pub fn help_text() -> String {
    let mut text = String::from(
        "Wpisz tekst, aby filtrować stacje po nazwie (pusta linia czyści filtr).\n\
         /r, /refresh        pobierz dane ponownie\n\
         /s, /sort <kolumna> sortuj po kolumnie (ponownie: odwróć kierunek)\n\
         /show <stacja>      pokaż dane wybranej stacji\n\
         /h, /help           pomoc\n\
         /q, /quit           zakończ\n\
         Kolumny:",
    );
    for (index, column) in Column::ALL.into_iter().enumerate() {
        text.push_str(&format!("\n  {:>2}. {:<10} {}", index + 1, column.key(), column.label()));
    }
    text
}

fn write_status<S: StationSource, V: TableView>(
    browser: &StationBrowser<S, V>,
    output: &mut impl Write,
) -> Result<(), SynopError> {
    let latest = browser
        .latest_measurement()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        output,
        "Stacji: {}, ostatni pomiar: {}",
        browser.all_records().len(),
        latest
    )?;
    Ok(())
}

/// Fetches once, then reads commands from `input` until end of input or `/quit`.
///
/// Prompts, help and status lines go to `output`; the table itself goes to the
/// browser's view.
pub fn run<S, V, R, W>(
    browser: &mut StationBrowser<S, V>,
    input: R,
    mut output: W,
) -> Result<(), SynopError>
where
    S: StationSource,
    V: TableView,
    R: BufRead,
    W: Write,
{
    browser.refresh()?;
    write_status(browser, &mut output)?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                debug!("Rejected input '{}': {}", line, e);
                writeln!(output, "{}", e)?;
                write!(output, "{}", PROMPT)?;
                output.flush()?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{}", help_text())?,
            Command::Refresh => {
                browser.refresh()?;
                write_status(browser, &mut output)?;
            }
            Command::Sort(column) => browser.header_clicked(column)?,
            Command::Show(name) => browser.show_station(&name)?,
            Command::Search(text) => browser.set_query(&text)?,
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    Ok(())
}
