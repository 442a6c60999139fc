use std::io;
use std::path::PathBuf;

use ansi_term::Color;
use linefeed::{Interface, ReadResult, Terminal};
use tracing::debug;

use crate::evaluator::{Env, Evaluator, SharedEnv, DEFAULT_MAX_CALL_DEPTH};
use crate::printer;
use crate::reader::{self, Statement};

static HISTORY_FILE: &str = "monkey.history";
static PROMPT: &str = ">> ";

#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    pub history_file: PathBuf,
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            history_file: PathBuf::from(HISTORY_FILE),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Session owns the root frame that every input of one run is evaluated in.
#[derive(Debug)]
pub struct Session {
    evaluator: Evaluator,
    env: SharedEnv,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            evaluator: Evaluator::new().with_max_call_depth(config.max_call_depth),
            env: Env::new().shared(),
        }
    }

    pub fn env(&self) -> &SharedEnv {
        &self.env
    }

    /// rep reads, evaluates and prints one input. It returns `false` when the
    /// input had syntax errors or evaluated to an error.
    pub fn rep(&self, mut out: impl io::Write, input: &str) -> io::Result<bool> {
        let (program, errors) = reader::read(input);
        if !errors.is_empty() {
            printer::print_syntax_errors_to(&mut out, &errors)?;
            return Ok(false);
        }

        let value = self.evaluator.eval(&program, &self.env);

        let ends_with_let = match program.statements.last() {
            Some(Statement::Let { .. }) => true,
            _ => false,
        };
        if value.is_error() || !ends_with_let {
            printer::println_to(&mut out, &value)?;
        }

        Ok(!value.is_error())
    }
}

fn configure_reader<T: Terminal>(reader: &Interface<T>, prompt: &str) -> io::Result<()> {
    let mut reader = reader.lock_reader();
    reader.set_blink_matching_paren(true);

    let style = Color::Purple.bold();

    reader.set_prompt(&format!(
        "\x01{prefix}\x02{text}\x01{suffix}\x02",
        prefix = style.prefix(),
        text = prompt,
        suffix = style.suffix()
    ))
}

fn is_quit(input: &str) -> bool {
    match input.trim() {
        "quit" | "q" => true,
        _ => false,
    }
}

pub fn run(config: &Config) -> io::Result<()> {
    let reader = Interface::new("monkey")?;
    configure_reader(&reader, &config.prompt)?;

    let history_file = &config.history_file;
    if let Err(e) = reader.load_history(history_file) {
        if e.kind() == io::ErrorKind::NotFound {
            println!(
                "History file {} doesn't exist, not loading history.",
                history_file.display()
            );
        } else {
            eprintln!(
                "Could not load history file {}: {}",
                history_file.display(),
                e
            );
        }
    }

    let session = Session::new(config);
    debug!(max_call_depth = config.max_call_depth, "repl started");

    loop {
        match reader.read_line()? {
            ReadResult::Input(input) => {
                if input.trim().is_empty() {
                    continue;
                }
                if is_quit(&input) {
                    break;
                }
                reader.add_history_unique(input.clone());
                session.rep(io::stdout(), &input)?;
            }
            ReadResult::Eof => {
                print!("^D");
                break;
            }
            ReadResult::Signal(signal) => {
                println!("signal: {:?}", signal);
                break;
            }
        }
    }

    if let Err(e) = reader.save_history(history_file) {
        eprintln!(
            "Could not save history file {}: {}",
            history_file.display(),
            e
        );
    }
    debug!("repl finished");

    Ok(())
}
