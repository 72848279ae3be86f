//! # Console Prompts
//!
//! Line-oriented questions to the operator.
//!
//! The console is generic over its input and output so flows can be driven
//! by a script in tests:
//!
//! ```rust,ignore
//! let mut console = Console::new(Cursor::new("2\n"), Vec::new());
//! assert_eq!(console.choose_role()?, Role::Manager);
//! ```
//!
//! ## Sentinels
//! - `q` quits wherever the prompt accepts it
//! - `y` is the only yes
//! - end of input reads as `q`

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{CliError, CliResult};
use coffee_core::{Role, QUIT, YES};

/// Prompt shown before a free-form answer.
pub const ARROW: &str = "->";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// The process's own terminal.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Gives the output back (tests read what was printed).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `prompt` without a newline and reads one trimmed line.
    ///
    /// End of input is returned as [`QUIT`].
    pub fn answer(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(QUIT.to_string());
        }

        Ok(line.trim().to_string())
    }

    /// Asks a yes/no question. Only `y` counts as yes.
    pub fn confirm(&mut self, question: &str) -> CliResult<bool> {
        self.say(question)?;
        Ok(self.answer(ARROW)? == YES)
    }

    /// `Who are you?` until the operator picks a role or quits.
    pub fn choose_role(&mut self) -> CliResult<Role> {
        loop {
            self.say("Who are you? (q - for quit or cancel)")?;
            for (number, role) in Role::ALL.iter().enumerate() {
                self.say(format_args!("    {} {}", number + 1, capitalize(role.as_str())))?;
            }

            let choice = self.answer(ARROW)?;
            if choice == QUIT {
                return Err(CliError::Aborted);
            }
            if let Some(index) = parse_choice(&choice, Role::ALL.len()) {
                return Ok(Role::ALL[index]);
            }
        }
    }

    /// Lists `items` as `1 ..`, `2 ..` and returns the 0-based index picked.
    ///
    /// Loops on anything that is not a listed number; `q` aborts.
    pub fn pick<T: Display>(&mut self, header: &str, items: &[T]) -> CliResult<usize> {
        loop {
            self.say(header)?;
            for (number, item) in items.iter().enumerate() {
                self.say(format_args!("{} {}", number + 1, item))?;
            }

            let choice = self.answer(ARROW)?;
            if choice == QUIT {
                return Err(CliError::Aborted);
            }
            if let Some(index) = parse_choice(&choice, items.len()) {
                return Ok(index);
            }
        }
    }
}

/// Maps a typed `1..=len` to a 0-based index.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
