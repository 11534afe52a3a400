//! A [`TableView`] that prints an aligned text grid to any writer.

use crate::table::{Header, TableView};
use crate::types::column::Column;
use crate::types::station::StationRecord;
use std::io::{self, Write};

const TITLE: &str = "Dane ze stacji IMGW";
const EMPTY_MESSAGE: &str = "Brak danych do wyświetlenia.";
const SEPARATOR: &str = " | ";

/// Renders the station table as plain text, e.g. to stdout.
///
/// Widths are measured in characters, so Polish diacritics and the sort arrows line up.
pub struct TextTable<W: Write> {
    out: W,
}

impl<W: Write> TextTable<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row(&mut self, cells: &[(String, Column)], widths: &[usize]) -> io::Result<()> {
        let line = cells
            .iter()
            .zip(widths)
            .map(|((cell, column), width)| pad(cell, *width, *column == Column::Station))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        writeln!(self.out, "{}", line.trim_end())
    }
}

fn pad(text: &str, width: usize, left: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if left {
        format!("{}{}", text, fill)
    } else {
        format!("{}{}", fill, text)
    }
}

impl<W: Write> TableView for TextTable<W> {
    fn render(&mut self, headers: &[Header], records: &[StationRecord]) -> io::Result<()> {
        writeln!(self.out, "{} ({})", TITLE, records.len())?;
        if records.is_empty() {
            writeln!(self.out, "{}", EMPTY_MESSAGE)?;
            return self.out.flush();
        }

        let header_cells: Vec<(String, Column)> = headers
            .iter()
            .map(|header| (header.label.clone(), header.column))
            .collect();
        let rows: Vec<Vec<(String, Column)>> = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|header| (header.column.cell(record), header.column))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].0.chars().count())
                    .chain(std::iter::once(header_cells[i].0.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        self.write_row(&header_cells, &widths)?;
        let rule = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(self.out, "{}", rule)?;
        for row in &rows {
            self.write_row(row, &widths)?;
        }
        self.out.flush()
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "Błąd: {}", message)?;
        self.out.flush()
    }

    fn show_station(&mut self, record: &StationRecord) -> io::Result<()> {
        writeln!(self.out, "{}\n", record.summary())?;
        self.out.flush()
    }
}
