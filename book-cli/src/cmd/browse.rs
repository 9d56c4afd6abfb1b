use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use book_core::{
    export_to_path, load_document, Action, AppState, BookConfig, ColumnMatching, ExportOutcome,
    FinishedExport, TitlePreset,
};
use clap::Args;
use tracing::debug;

use super::TitleArgs;
use crate::terminal::{use_color, Terminal, DEFAULT_WIDTH};

const HELP: &str = "\
Commands:
  n, next          next page
  p, prev          previous page
  g N, N           go to page N
  size N           set title size (16-40)
  preset NAME      small, medium, large, extra-large
  export [PATH]    write the PDF
  load PATH        open another CSV
  remove           close the current CSV
  help             show this help
  q, quit          leave";

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// CSV to open first; `load PATH` opens one later
    pub csv: Option<PathBuf>,

    /// Match column names ignoring case and surrounding spaces
    #[arg(long)]
    pub case_insensitive: bool,

    #[command(flatten)]
    pub title: TitleArgs,

    /// Print without terminal colors
    #[arg(long)]
    pub no_color: bool,

    /// Terminal panel width in columns
    #[arg(long, value_name = "COLS", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
}

pub fn run(args: BrowseArgs, config: &BookConfig) -> anyhow::Result<()> {
    let matching = if args.case_insensitive {
        ColumnMatching::CaseInsensitive
    } else {
        config.column_matching
    };
    let mut session = Session {
        state: AppState::new(args.title.resolve(config)?),
        terminal: Terminal::new(use_color(args.no_color), args.width),
        matching,
        config,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(path) = args.csv {
        session.load(path, &mut out)?;
    } else {
        session.show(&mut out)?;
    }
    session.run(io::stdin().lock(), &mut out)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Show,
    Next,
    Previous,
    /// One-based page number as typed.
    Jump(usize),
    Size(u32),
    Preset(TitlePreset),
    Export(Option<PathBuf>),
    Load(PathBuf),
    Remove,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| format!("not a page number: {s:?}"))
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Show),
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" | "previous" => Ok(Command::Previous),
        "g" | "go" | "goto" => number(rest).map(Command::Jump),
        "size" => rest
            .parse()
            .map(Command::Size)
            .map_err(|_| format!("not a title size: {rest:?}")),
        "preset" => rest
            .parse()
            .map(Command::Preset)
            .map_err(|e: book_core::SettingsError| e.to_string()),
        "export" => Ok(Command::Export(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "load" if !rest.is_empty() => Ok(Command::Load(PathBuf::from(rest))),
        "load" => Err("usage: load PATH".to_string()),
        "remove" => Ok(Command::Remove),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        _ if rest.is_empty() && word.chars().all(|c| c.is_ascii_digit()) => {
            number(word).map(Command::Jump)
        }
        _ => Err(format!("unknown command {word:?}; type `help`")),
    }
}

struct Session<'a> {
    state: AppState,
    terminal: Terminal,
    matching: ColumnMatching,
    config: &'a BookConfig,
}

impl Session<'_> {
    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        prompt(out)?;
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, out)?,
                Err(message) => writeln!(out, "{}", message)?,
            }
            prompt(out)?;
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        debug!(?command, "browse command");
        match command {
            Command::Show => self.show(out),
            Command::Next => self.apply(Action::Next, out),
            Command::Previous => self.apply(Action::Previous, out),
            Command::Jump(0) => writeln!(out, "pages are numbered from 1"),
            Command::Jump(n) => self.apply(Action::JumpTo(n - 1), out),
            Command::Size(points) => self.apply(Action::SetTitleSize(points), out),
            Command::Preset(preset) => self.apply(Action::SetPreset(preset), out),
            Command::Export(path) => self.export(path, out),
            Command::Load(path) => self.load(path, out),
            Command::Remove => self.apply(Action::Remove, out),
            Command::Help => writeln!(out, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn apply<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        match self.state.apply(action) {
            Ok(()) => self.show(out),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn load<W: Write>(&mut self, path: PathBuf, out: &mut W) -> io::Result<()> {
        let action = match load_document(&path, self.matching) {
            Ok(loaded) => {
                writeln!(
                    out,
                    "Loaded {} ({}, {} pages)",
                    loaded.name,
                    loaded.size_label(),
                    loaded.document.len()
                )?;
                Action::Loaded(loaded)
            }
            Err(e) => Action::LoadFailed(format!("Failed to parse CSV file: {}", e)),
        };
        self.apply(action, out)
    }

    fn export<W: Write>(&mut self, path: Option<PathBuf>, out: &mut W) -> io::Result<()> {
        let Some(ticket) = self.state.begin_export() else {
            return writeln!(out, "{}", self.terminal.placeholder());
        };
        let dest = path.unwrap_or_else(|| self.config.output.clone());
        let options = ticket.options(&self.config.export_options());
        let result = export_to_path(&ticket.document, &dest, &options);
        match self.state.finish_export(ticket, result) {
            FinishedExport::Completed(ExportOutcome::Written { path, pages }) => {
                writeln!(out, "Wrote {} pages to {}", pages, path.display())
            }
            FinishedExport::Completed(ExportOutcome::Skipped) => {
                writeln!(out, "{}", self.terminal.placeholder())
            }
            FinishedExport::Failed => writeln!(
                out,
                "Error: {}",
                self.state.last_error().unwrap_or("export failed")
            ),
            FinishedExport::Discarded => Ok(()),
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(message) = self.state.last_error() {
            writeln!(out, "Error: {}", message)?;
        }
        let Some(descriptor) = self.state.current_descriptor() else {
            return writeln!(out, "{}", self.terminal.placeholder());
        };
        write!(out, "{}", self.terminal.page(&descriptor))?;
        let pager = self.state.pager();
        if let Some(label) = pager.position_label() {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                self.terminal
                    .controls(&label, pager.has_previous(), pager.has_next())
            )?;
        }
        writeln!(out, "Title size: {}", self.state.title_size())
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
