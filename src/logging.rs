use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record};

use crate::options::{CliOptions, LogFormat};
use crate::{Error, Result};

/// Installs the process-wide logger described by the CLI options.
///
/// Library crates only use the `log` facade; nothing is printed until this
/// runs.
pub fn init_logger(options: &CliOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{}", render(log_format, record))
        });

    let target = match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!("failed to create log output file {log_path}: {e}"))
            })?;
            Target::Pipe(Box::new(log_file))
        }
        None => Target::Stderr,
    };
    builder.target(target);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn render(format: LogFormat, record: &Record<'_>) -> String {
    let tag = level_tag(record.level());
    match format {
        LogFormat::Compact => format!("{tag} {}", record.args()),
        LogFormat::Pretty => format!("{tag} [{}] {}", record.target(), record.args()),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
