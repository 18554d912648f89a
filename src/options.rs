use std::{env, path::PathBuf};

use log::LevelFilter;

use crate::{Error, Result};

/// Command-line options for the decoder binary.
#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    /// TSPLIB95 instance files to decode, in output order.
    pub files: Vec<PathBuf>,
    /// Print one summary line per file instead of the full network.
    pub summary: bool,
    /// Worker threads for batch decoding. Zero lets rayon decide.
    pub threads: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {raw} (expected error|warn|info|debug|trace|off)"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {raw} (expected compact|pretty)"
            ))),
        }
    }
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            summary: false,
            threads: 0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
        }
    }
}

impl CliOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub(crate) fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(|arg| arg.as_ref().to_owned());

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                options.files.push(PathBuf::from(arg));
                continue;
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, inline_value) = match raw_name.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (raw_name.to_string(), None),
            };

            match name.as_str() {
                "summary" => {
                    options.summary = match inline_value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "log-timestamp" => {
                    options.log_timestamp = match inline_value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "threads" => {
                    let value = require_value(&name, inline_value, &mut args)?;
                    options.threads = value.parse().map_err(|e| {
                        Error::invalid_input(format!("Invalid value for --{name}: {value} ({e})"))
                    })?;
                }
                "log-level" => {
                    options.log_level =
                        LogLevel::parse(&require_value(&name, inline_value, &mut args)?)?;
                }
                "log-format" => {
                    options.log_format =
                        LogFormat::parse(&require_value(&name, inline_value, &mut args)?)?;
                }
                "log-output" => {
                    options.log_output = require_value(&name, inline_value, &mut args)?;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        if options.files.is_empty() {
            return Err(Error::invalid_input(format!(
                "No input files given\n\n{}",
                Self::usage()
            )));
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsplib-net [options] <instance.tsp>...\n\n",
            "Options:\n",
            "  --summary             One line per instance instead of the full network\n",
            "  --threads <usize>     Worker threads for batch decoding (0 = all cores)\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp\n",
            "  --log-output <path>   Write logs to a file instead of stderr\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&str> {
        let path = self.log_output.trim();
        if path.is_empty() { None } else { Some(path) }
    }
}

fn require_value(
    name: &str,
    inline_value: Option<String>,
    args: &mut impl Iterator<Item = String>,
) -> Result<String> {
    inline_value
        .or_else(|| args.next())
        .ok_or_else(|| Error::invalid_input(format!("Option --{name} requires a value")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
