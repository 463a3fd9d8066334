use crate::api::ContactsApi;
use crate::contact_book::ContactBook;
use crate::models::contact::{Contact, Field};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const HELP: &str = "Commands: add, edit <row>, delete <row>, refresh, help, quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add,
    Edit(usize),
    Delete(usize),
    Refresh,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut args = line.split_whitespace();
    let Some(name) = args.next() else {
        return Ok(None);
    };

    let mut row = || {
        args.next()
            .and_then(|row| row.parse::<usize>().ok())
            .filter(|row| *row > 0)
            .ok_or_else(|| format!("Usage: {name} <row>"))
    };

    let command = match name {
        "add" => Command::Add,
        "edit" => Command::Edit(row()?),
        "delete" => Command::Delete(row()?),
        "refresh" => Command::Refresh,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(format!("Unknown command \"{name}\". {HELP}")),
    };

    Ok(Some(command))
}

/// Renders the title bar and the contact table with 1-based row numbers
pub fn render(contacts: &[Contact]) -> String {
    let header = ["#", "Name", "Email", "Phone"];
    let rows: Vec<[String; 4]> = contacts
        .iter()
        .enumerate()
        .map(|(index, contact)| {
            [
                (index + 1).to_string(),
                contact.name.clone(),
                contact.email.clone(),
                contact.phone.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut table = String::from("Contact App\n\n");
    table.push_str(&format_row(header));
    for row in &rows {
        table.push_str(&format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    if rows.is_empty() {
        table.push_str("(no contacts)\n");
    }
    table
}

/// Interactive loop over `input`, writing the view to `output`
pub struct Terminal<A: ContactsApi, R, W> {
    book: ContactBook<A>,
    lines: Lines<R>,
    output: W,
}

impl<A, R, W> Terminal<A, R, W>
where
    A: ContactsApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(book: ContactBook<A>, input: R, output: W) -> Self {
        Terminal {
            book,
            lines: input.lines(),
            output,
        }
    }

    pub fn book(&self) -> &ContactBook<A> {
        &self.book
    }

    /// Runs until `quit` or the end of input
    pub async fn run(&mut self) -> io::Result<()> {
        self.book.mount().await;
        self.show()?;
        writeln!(self.output, "{HELP}")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.lines.next_line().await? else {
                return Ok(());
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    continue;
                }
            };

            match command {
                Command::Add => {
                    if !self.fill_form().await? {
                        return Ok(());
                    }
                    self.book.submit().await;
                    self.show()?;
                }

                Command::Edit(row) => {
                    let Some(contact) = self.contact_at(row)? else {
                        continue;
                    };
                    self.book.edit(&contact);
                    if !self.fill_form().await? {
                        return Ok(());
                    }
                    self.book.submit().await;
                    self.show()?;
                }

                Command::Delete(row) => {
                    let Some(contact) = self.contact_at(row)? else {
                        continue;
                    };
                    self.book.delete(&contact.id).await;
                    self.show()?;
                }

                Command::Refresh => {
                    self.book.fetch_contacts().await;
                    self.show()?;
                }

                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => return Ok(()),
            }
        }
    }

    fn show(&mut self) -> io::Result<()> {
        write!(self.output, "\n{}\n", render(self.book.contacts()))
    }

    fn contact_at(&mut self, row: usize) -> io::Result<Option<Contact>> {
        let contact = self.book.contacts().get(row - 1).cloned();
        if contact.is_none() {
            writeln!(self.output, "No contact in row {row}")?;
        }
        Ok(contact)
    }

    /// Prompts for every field. Returns false when the input ended mid-form.
    ///
    /// Empty answers are asked again, unless the form already holds a value for
    /// the field, in which case it is kept.
    async fn fill_form(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{}", self.book.submit_label())?;

        for field in Field::ALL {
            let current = self.book.form().get(field).to_string();
            let value = loop {
                if current.is_empty() {
                    write!(self.output, "{}: ", field.label())?;
                } else {
                    write!(self.output, "{} [{current}]: ", field.label())?;
                }
                self.output.flush()?;

                let Some(line) = self.lines.next_line().await? else {
                    return Ok(false);
                };

                let line = line.trim();
                if !line.is_empty() {
                    break line.to_string();
                }
                if !current.is_empty() {
                    break current.clone();
                }
                writeln!(self.output, "{} is required", field.label())?;
            };

            self.book.change(field, value);

            let error = match field {
                Field::Email => self.book.email_error(),
                Field::Phone => self.book.phone_error(),
                Field::Name => "",
            };
            if !error.is_empty() {
                writeln!(self.output, "{error}")?;
            }
        }

        Ok(true)
    }
}
