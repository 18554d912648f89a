//! Parallel decoding of many instance files.
//!
//! A failing file never aborts the batch: its error is kept in its report and
//! the remaining files are still decoded.

use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tsplib::{DecodedNetwork, TsplibInstance, TsplibResult};

use crate::{Error, Result};

pub struct FileReport {
    pub path: PathBuf,
    pub outcome: TsplibResult<DecodedNetwork>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// One-line description of a decoded file.
pub struct Summary<'a>(pub &'a FileReport);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let report = self.0;
        write!(f, "{}: ", report.path.display())?;
        match &report.outcome {
            Ok(decoded) => {
                let network = &decoded.network;
                write!(
                    f,
                    "nodes={} depots={} links={}",
                    network.nodes.len(),
                    network.depots().count(),
                    network.link_count()
                )?;
                if let Some(symmetric) = network.is_symmetric() {
                    write!(f, " symmetric={symmetric}")?;
                }
                if network.euclidean {
                    write!(f, " euclidean=true")?;
                }
                write!(f, " warnings={}", decoded.warnings.len())
            }
            Err(err) => write!(f, "error: {err}"),
        }
    }
}

pub fn decode_file(path: &Path) -> TsplibResult<DecodedNetwork> {
    TsplibInstance::from_file(path)?.decode()
}

/// Decodes every file; reports come back in input order.
pub fn decode_files(paths: &[PathBuf], threads: usize) -> Result<Vec<FileReport>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

    log::info!("batch.start: files={} threads={}", paths.len(), pool.current_num_threads());

    let reports: Vec<FileReport> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let outcome = decode_file(path);
                match &outcome {
                    Ok(decoded) => {
                        for warning in &decoded.warnings {
                            log::warn!("batch.file: path={} warning={warning}", path.display());
                        }
                        log::debug!(
                            "batch.file: path={} nodes={} links={}",
                            path.display(),
                            decoded.network.nodes.len(),
                            decoded.network.link_count()
                        );
                    }
                    Err(err) => log::error!("batch.file: path={} error={err}", path.display()),
                }
                FileReport {
                    path: path.clone(),
                    outcome,
                }
            })
            .collect()
    });

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    log::info!("batch.done: files={} failed={failed}", reports.len());
    Ok(reports)
}
