mod batch;
mod error;
mod logging;
mod options;

use std::time::Instant;

use log::info;

use crate::batch::Summary;
use crate::error::{Error, Result};
use crate::options::CliOptions;

fn main() -> Result<()> {
    let now = Instant::now();
    let options = match CliOptions::from_args() {
        Ok(options) => options,
        Err(Error::InvalidInput(message)) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
        Err(err) => return Err(err),
    };
    logging::init_logger(&options)?;

    let reports = batch::decode_files(&options.files, options.threads)?;

    let mut failed = 0;
    for report in &reports {
        if options.summary {
            println!("{}", Summary(report));
            if !report.is_ok() {
                failed += 1;
            }
            continue;
        }
        match &report.outcome {
            Ok(decoded) => print!("{}", decoded.network),
            Err(err) => {
                eprintln!("{}: {err}", report.path.display());
                failed += 1;
            }
        }
    }

    info!(
        "output: files={} failed={failed} time={:.2}s",
        reports.len(),
        now.elapsed().as_secs_f32()
    );

    if failed > 0 {
        return Err(Error::other(format!(
            "{failed} of {} instance(s) failed to decode",
            reports.len()
        )));
    }
    Ok(())
}
