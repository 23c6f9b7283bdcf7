use analysis::{AnalysisError, Selection, Settings};

use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Descriptive statistics for a crime incident CSV file
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short = 'i', long = "input", help = "incident file [default: crimes.csv]")]
    input: Option<PathBuf>,

    #[arg(
        short = 'c',
        long = "config",
        default_value = ".crime-stat.yml",
        help = "yaml config file, ignored when missing"
    )]
    config: PathBuf,

    #[arg(long = "crime-type", help = "crime type of the filtered view [default: THEFT]")]
    crime_type: Option<String>,

    #[arg(
        long = "community-area",
        help = "community area of the filtered view [default: 25]"
    )]
    community_area: Option<i64>,

    #[arg(long = "top", help = "rows in the crime type and area listings [default: 10]")]
    top: Option<usize>,

    #[arg(long = "separator", help = "field separator [default: ,]")]
    separator: Option<char>,

    #[arg(long = "skip-inspection", action = clap::ArgAction::SetTrue, help = "do not print the initial data inspection")]
    skip_inspection: bool,
}

/// Merge flags over config values over defaults.
fn resolve_settings(args: Args, conf: config::Config) -> Result<Settings, String> {
    let defaults = Settings::default();
    let separator = match args.separator.or(conf.separator) {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => return Err(format!("separator must be a single ascii character, got {c:?}")),
        None => defaults.separator,
    };
    let default_selection = Selection::default();
    Ok(Settings {
        input: args
            .input
            .or(conf.input.map(PathBuf::from))
            .unwrap_or(defaults.input),
        separator,
        selection: Selection {
            crime_type: args
                .crime_type
                .or(conf.crime_type)
                .unwrap_or(default_selection.crime_type),
            community_area: args
                .community_area
                .or(conf.community_area)
                .unwrap_or(default_selection.community_area),
        },
        top: args.top.or(conf.top).unwrap_or(defaults.top),
        inspect: !args.skip_inspection,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let conf = match config::Config::new(&args.config) {
        Ok(conf) => conf,
        Err(e) => {
            error!("config {:?} invalid: {}", args.config, e);
            return ExitCode::from(2);
        }
    };
    info!("config: {:?}", args.config);

    let settings = match resolve_settings(args, conf) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };
    debug!("settings: {:?}", settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = analysis::report::run(&settings, &mut out)
        .and_then(|()| out.flush().map_err(AnalysisError::from));
    ExitCode::from(exit_code(&result, &mut out))
}

/// 0 on success, 1 when the input is missing, 2 for any other failure.
/// A missing input is reported on `out` next to the report text.
fn exit_code<W: Write>(result: &analysis::Result<()>, out: &mut W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e @ AnalysisError::FileNotFound { .. }) => {
            match writeln!(out, "Error: {}", e).and_then(|()| out.flush()) {
                Ok(()) => 1,
                Err(e) => {
                    error!("{}", e);
                    2
                }
            }
        }
        Err(e) => {
            error!("{}", e);
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("crime-stat").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = resolve_settings(args(&[]), config::Config::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.input, PathBuf::from("crimes.csv"));
        assert_eq!(settings.selection.crime_type, "THEFT");
        assert_eq!(settings.selection.community_area, 25);
        assert_eq!(settings.top, 10);
    }

    #[test]
    fn test_flags_override_config() {
        let conf = config::Config {
            input: Some("from-config.csv".to_string()),
            crime_type: Some("BATTERY".to_string()),
            community_area: Some(8),
            top: Some(3),
            separator: Some(';'),
        };
        let settings = resolve_settings(
            args(&["--crime-type", "ASSAULT", "--top", "20", "--skip-inspection"]),
            conf,
        )
        .unwrap();
        assert_eq!(settings.input, PathBuf::from("from-config.csv"));
        assert_eq!(settings.selection.crime_type, "ASSAULT");
        assert_eq!(settings.selection.community_area, 8);
        assert_eq!(settings.top, 20);
        assert_eq!(settings.separator, b';');
        assert!(!settings.inspect);
    }

    #[test]
    fn test_non_ascii_separator() {
        assert!(resolve_settings(args(&["--separator", "§"]), config::Config::default()).is_err());
    }

    #[test]
    fn test_exit_code_success() {
        let mut out = Vec::new();
        assert_eq!(exit_code(&Ok(()), &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_exit_code_missing_input() {
        let settings = Settings {
            input: PathBuf::from("does/not/exist/crimes.csv"),
            ..Settings::default()
        };
        let mut out = Vec::new();
        let result = analysis::report::run(&settings, &mut out);
        assert_eq!(exit_code(&result, &mut out), 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: does/not/exist/crimes.csv not found. Please ensure the file is in the same directory.\n"
        );
    }

    #[test]
    fn test_exit_code_other_failure() {
        let result = Err(AnalysisError::InvalidTimestamp {
            row: 4,
            value: "yesterday".to_string(),
        });
        let mut out = Vec::new();
        assert_eq!(exit_code(&result, &mut out), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_exit_code_broken_output() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        let flushed = Broken.flush().map_err(AnalysisError::from);
        assert_eq!(exit_code(&flushed, &mut Vec::new()), 2);

        let missing = Err(AnalysisError::FileNotFound {
            path: PathBuf::from("crimes.csv"),
        });
        assert_eq!(exit_code(&missing, &mut Broken), 2);
    }
}
