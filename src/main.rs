// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

/// redactor command-line entry point and CLI orchestration.
///
/// The binary ties together the vocabulary loader and the substitution
/// engine.  This file is intentionally light on substitution logic; it
/// wires user input into the focused modules under `src/vocab` and
/// `src/engine`.  The comments favour UK English and aim to give future
/// maintainers a quick reminder of why each function exists and how it
/// cooperates with the rest of the app.
mod engine;
mod vocab;

use anyhow::{Result, anyhow};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use engine::{SubstitutionMode, substitute_file};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use vocab::load_vocabulary;

/// Build-time version information.  The CI pipeline bakes in the most recent
/// tag via `REDACTOR_VERSION`; otherwise we fall back to Cargo’s package
/// version which tracks the published crate.
const VERSION: &str = match option_env!("REDACTOR_VERSION") {
    Some(tag) => tag,
    None => env!("CARGO_PKG_VERSION"),
};

/// Determine the current Git branch, defaulting to `main` when the metadata
/// was not injected during the build.
fn branch() -> &'static str {
    option_env!("REDACTOR_BRANCH").unwrap_or("main")
}

/// Determine the short Git commit that went into the binary.  We rely on CI
/// to provide this, but fall back to a recognisable placeholder.
fn sha() -> &'static str {
    option_env!("REDACTOR_COMMIT").unwrap_or("0000000")
}

/// Determine the rustc version baked in at build time.
fn rust_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Human-friendly version banner including branch and commit.
fn version_string() -> String {
    format!(
        "redactor {VERSION} (branch:{}, commit:{}) [rust:{}]",
        branch(),
        sha(),
        rust_version()
    )
}

/// Cached version string with a 'static lifetime for clap metadata.
fn version_str() -> &'static str {
    static VERSION_STR: OnceLock<String> = OnceLock::new();
    VERSION_STR.get_or_init(version_string).as_str()
}

/// Conventional `main` that defers to `run` so the logic keeps returning
/// explicit exit codes instead of calling `std::process::exit` mid-flow.
fn main() {
    std::process::exit(match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    });
}

/// Parse CLI arguments, configure the log sink, check the input paths and
/// finally drive the substitution engine.  Everything user-facing goes
/// through here, so the structure favours clarity over cleverness.
fn run() -> Result<i32> {
    let cmd = build_cli();
    let matches = match cmd.try_get_matches() {
        Ok(m) => m,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                if err.kind() == ErrorKind::DisplayHelp {
                    print_usage();
                }
                return Ok(0);
            }
            _ => err.exit(),
        },
    };

    let opts = CliOptions::from_matches(&matches)?;
    init_logging(opts.log_level);

    // Mirror the loader checks up front so the user gets one clear message
    // per missing path before any work starts.
    if !Path::new(&opts.input_file).exists() {
        error!("Input file does not exist: {}", opts.input_file);
        return Ok(1);
    }
    if !Path::new(&opts.vocabulary_file).exists() {
        error!("Vocabulary file does not exist: {}", opts.vocabulary_file);
        return Ok(1);
    }

    let vocabulary = match load_vocabulary(Path::new(&opts.vocabulary_file)) {
        Ok(vocabulary) => vocabulary,
        Err(err) => {
            error!("{err}");
            return Ok(1);
        }
    };

    if vocabulary.is_empty() {
        warn!(
            "Vocabulary file {} contains no entries; no terms will be replaced",
            opts.vocabulary_file
        );
    } else {
        debug!("loaded {} vocabulary entries", vocabulary.len());
    }

    let mode = if opts.randomize {
        SubstitutionMode::Randomized
    } else {
        SubstitutionMode::Literal
    };

    match substitute_file(
        Path::new(&opts.input_file),
        &vocabulary,
        Path::new(&opts.output_file),
        mode,
    ) {
        Ok(()) => {
            info!(
                "Successfully replaced terms in {} and saved to {}",
                opts.input_file, opts.output_file
            );
            Ok(0)
        }
        Err(err) => {
            error!("{err}");
            Ok(1)
        }
    }
}

/// Construct the `clap` command with all supported arguments.
fn build_cli() -> Command {
    Command::new("redactor")
        .about("Replaces sensitive terms in text files using a user-supplied vocabulary")
        .version(version_str())
        .arg(
            Arg::new("input_file")
                .value_name("INPUT")
                .required(true)
                .help("Path to the input text file"),
        )
        .arg(
            Arg::new("vocabulary_file")
                .value_name("VOCABULARY")
                .required(true)
                .help("Path to the vocabulary file; 'sensitive_term' or 'sensitive_term,replacement_term' per line"),
        )
        .arg(
            Arg::new("output_file")
                .value_name("OUTPUT")
                .required(true)
                .help("Path to the output text file (always written as UTF-8)"),
        )
        .arg(
            Arg::new("randomize")
                .long("randomize")
                .action(ArgAction::SetTrue)
                .help("Replace each term with a generated name; the vocabulary must contain bare sensitive terms only"),
        )
        .arg(
            Arg::new("log_level")
                .long("log_level")
                .value_name("LEVEL")
                .default_value("INFO")
                .help("Logging verbosity: DEBUG, INFO, WARNING, ERROR or CRITICAL"),
        )
}

/// Structured view of the CLI flags so downstream code gets type-safe access
/// to user intent.
struct CliOptions {
    input_file: String,
    vocabulary_file: String,
    output_file: String,
    randomize: bool,
    log_level: LevelFilter,
}

impl CliOptions {
    /// Translate clap’s `ArgMatches` into our strongly typed `CliOptions`.
    /// The function centralises validation so the rest of the code can assume
    /// sane defaults and bail out early when a user supplies nonsense.
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            input_file: required_path(matches, "input_file")?,
            vocabulary_file: required_path(matches, "vocabulary_file")?,
            output_file: required_path(matches, "output_file")?,
            randomize: matches.get_flag("randomize"),
            log_level: parse_log_level(matches.get_one::<String>("log_level"))?,
        })
    }
}

/// Fetch a required positional argument.  clap enforces presence, so a miss
/// here means the CLI definition and this accessor have drifted apart.
fn required_path(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument <{name}>"))
}

/// Interpret the `--log_level` choice.  CRITICAL is accepted for
/// compatibility with older tooling and rides along with ERROR, the most
/// severe level the sink distinguishes.
fn parse_log_level(value: Option<&String>) -> Result<LevelFilter> {
    let raw = value.map(String::as_str).unwrap_or("INFO");
    match raw.to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::ERROR),
        other => {
            print_usage();
            Err(anyhow!("invalid value for --log_level: {other}"))
        }
    }
}

/// Configure the process-wide log sink exactly once, with the level taken
/// from the parsed CLI options rather than the environment.  Logs go to
/// stderr so stdout workflows stay clean.
fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the condensed usage guide.  Kept in one function so we can reuse it
/// whenever argument parsing fails.
fn print_usage() {
    static USAGE: &str = include_str!("../resources/messages/usage_en.txt");
    println!("\n{USAGE}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_matches_components() {
        let expected = format!(
            "redactor {VERSION} (branch:{}, commit:{}) [rust:{}]",
            branch(),
            sha(),
            rust_version()
        );
        assert_eq!(version_string(), expected);
    }

    #[test]
    fn version_str_is_cached() {
        let first = version_str() as *const str;
        let second = version_str() as *const str;
        assert_eq!(first, second, "cached version string should be stable");
    }

    #[test]
    fn log_levels_parse_case_insensitively() {
        assert_eq!(
            parse_log_level(Some(&"warning".to_string())).unwrap(),
            LevelFilter::WARN
        );
        assert_eq!(
            parse_log_level(Some(&"debug".to_string())).unwrap(),
            LevelFilter::DEBUG
        );
    }

    #[test]
    fn critical_rides_along_with_error() {
        assert_eq!(
            parse_log_level(Some(&"CRITICAL".to_string())).unwrap(),
            LevelFilter::ERROR
        );
    }

    #[test]
    fn unknown_log_level_errors() {
        assert!(parse_log_level(Some(&"LOUD".to_string())).is_err());
    }

    #[test]
    fn missing_log_level_defaults_to_info() {
        assert_eq!(parse_log_level(None).unwrap(), LevelFilter::INFO);
    }
}
