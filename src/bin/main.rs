use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;

use monkey::evaluator::DEFAULT_MAX_CALL_DEPTH;
use monkey::repl::{self, Config, Session};

#[derive(Parser)]
#[command(name = "monkey", version, about = "Monkey language interpreter")]
struct Cli {
    /// Script to evaluate instead of starting the REPL
    file: Option<PathBuf>,

    /// Evaluate SOURCE and print the result
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "file")]
    eval: Option<String>,

    /// REPL history file
    #[arg(long, value_name = "PATH", default_value = "monkey.history")]
    history: PathBuf,

    /// Nested calls allowed before evaluation fails
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            history_file: self.history.clone(),
            max_call_depth: self.max_call_depth,
            ..Config::default()
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stay silent unless RUST_LOG asks for output
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn eval_source(config: &Config, source: &str) -> io::Result<bool> {
    let session = Session::new(config);
    let stdout = io::stdout();
    session.rep(stdout.lock(), source)
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config();

    let result = match (&cli.eval, &cli.file) {
        (Some(source), _) => eval_source(&config, source),
        (None, Some(file)) => {
            debug!(file = %file.display(), "evaluating script");
            fs::read_to_string(file).and_then(|source| eval_source(&config, &source))
        }
        (None, None) => repl::run(&config).map(|_| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
