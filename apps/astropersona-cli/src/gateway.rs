use anyhow::Context;
use astropersona::ephemeris::{Ephemeris, SnapshotEphemeris};
use std::path::{Path, PathBuf};

/// Pick the ephemeris: a snapshot file when given, else the Swiss Ephemeris.
pub fn open(
    snapshot: Option<&Path>,
    ephemeris_path: Option<PathBuf>,
) -> anyhow::Result<Box<dyn Ephemeris>> {
    if let Some(path) = snapshot {
        let eph = SnapshotEphemeris::from_path(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        log::info!("Using ephemeris snapshot {}", path.display());
        return Ok(Box::new(eph));
    }
    open_swiss(ephemeris_path)
}

#[cfg(feature = "swisseph")]
fn open_swiss(ephemeris_path: Option<PathBuf>) -> anyhow::Result<Box<dyn Ephemeris>> {
    let adapter = astropersona::ephemeris::SwissEphemerisAdapter::new(ephemeris_path)
        .context("Failed to initialise the Swiss Ephemeris")?;
    log::info!("Using Swiss Ephemeris at {}", adapter.ephemeris_path().display());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn open_swiss(_ephemeris_path: Option<PathBuf>) -> anyhow::Result<Box<dyn Ephemeris>> {
    anyhow::bail!("No --snapshot given and this build lacks the `swisseph` feature")
}
