mod report;

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use hundate::{
    Context, Error, Options, SearchScope, parse_duration_detailed, parse_frequency, text2date_with_spans,
    text2datetime_verbose, text2datetime_with_spans, text2time_with_spans,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use report::Palette;

const REFERENCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Extract dates, times, durations and frequencies from Hungarian text.
#[derive(Parser, Debug)]
#[command(name = "hundate", version, about, long_about = None)]
struct Args {
    /// Words of the input sentence. Read from stdin when neither this nor
    /// --input is given.
    text: Vec<String>,

    /// Input sentence.
    #[arg(short, long, conflicts_with = "text")]
    input: Option<String>,

    /// Reference time; defaults to the current local time.
    #[arg(long, value_name = "YYYY-MM-DDTHH:MM:SS")]
    reference: Option<String>,

    /// How bare weekdays and months are resolved.
    #[arg(long, value_enum, default_value_t = Scope::NotRestricted)]
    scope: Scope,

    /// Accept 4-digit years outside 1900..2100.
    #[arg(long)]
    allow_unrealistic_years: bool,

    #[arg(long, value_enum, default_value_t = Mode::Datetime)]
    mode: Mode,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Force ANSI colour output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI colour output.
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr and a per-segment rule trace.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scope {
    NotRestricted,
    Past,
    Future,
}

impl From<Scope> for SearchScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::NotRestricted => SearchScope::NotRestricted,
            Scope::Past => SearchScope::PastSearch,
            Scope::Future => SearchScope::FutureDay,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Datetime,
    Date,
    Time,
    Duration,
    Frequency,
}

enum Failure {
    /// Bad arguments or missing input; exit code 2.
    Usage(String),
    Internal(String),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Usage(message)) => {
            eprintln!("error: {message}");
            ExitCode::from(2)
        }
        Err(Failure::Internal(message)) => {
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(args: &Args) -> Result<(), Failure> {
    let text = input_text(args)?;
    let context = match &args.reference {
        Some(value) => Context { reference_time: parse_reference(value).map_err(|e| Failure::Usage(e.to_string()))? },
        None => Context::default(),
    };
    let options = Options { search_scope: args.scope.into(), realistic_year_required: !args.allow_unrealistic_years };
    let palette = Palette::new(!args.no_color && (args.color || io::stdout().is_terminal()));
    tracing::debug!(text = %text, reference = %context.reference_time, ?options, "parsing");

    match args.mode {
        Mode::Datetime if args.verbose => {
            let details = text2datetime_verbose(&text, &context, &options);
            if args.json {
                return print_json(&details);
            }
            report::print_details(&details, &palette);
        }
        Mode::Datetime => {
            let intervals = text2datetime_with_spans(&text, &context, &options);
            if args.json {
                return print_json(&intervals);
            }
            report::print_intervals(&intervals, &palette);
        }
        Mode::Date => {
            let intervals = text2date_with_spans(&text, &context, &options);
            if args.json {
                return print_json(&intervals);
            }
            report::print_intervals(&intervals, &palette);
        }
        Mode::Time => {
            let intervals = text2time_with_spans(&text, &context, &options);
            if args.json {
                return print_json(&intervals);
            }
            report::print_intervals(&intervals, &palette);
        }
        Mode::Duration => {
            let duration = parse_duration_detailed(&text);
            if args.json {
                return print_json(&duration);
            }
            report::print_duration(duration.as_ref(), &palette);
        }
        Mode::Frequency => {
            let found = parse_frequency(&text);
            if args.json {
                return print_json(&found);
            }
            report::print_frequency(found.as_ref(), &palette);
        }
    }
    Ok(())
}

fn input_text(args: &Args) -> Result<String, Failure> {
    let text = match (&args.input, args.text.is_empty()) {
        (Some(input), _) => input.clone(),
        (None, false) => args.text.join(" "),
        (None, true) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| Failure::Internal(format!("failed to read stdin: {err}")))?;
            buffer
        }
    };
    if text.trim().is_empty() {
        return Err(Failure::Usage("no input provided".to_string()));
    }
    Ok(text.trim().to_string())
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, REFERENCE_FORMAT).map_err(|_| Error::InvalidReference(value.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Failure> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| Failure::Internal(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}
