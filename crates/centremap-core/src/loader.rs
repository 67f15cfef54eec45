// crates/centremap-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer: reads the three source tables from a data
//! directory, normalizes them into a [`CentreDb`], and maintains a binary
//! cache next to the sources for fast subsequent loads.
//!
//! - Site catalog: `centres.csv`
//! - Sub-site enrichment: `sub_sites.csv`
//! - Commune notifications: `communes_notifiees.csv`, or
//!   `communes_notifiees.xlsx` with the `xlsx` feature
//!
//! Row-level failures are skipped with a warning; a missing notification
//! table degrades to an empty table (all joins miss), only the site catalog
//! is mandatory.

use crate::error::{CentreError, Result};
use crate::model::{build_centre_db, CentreDb, DefaultBackend};
use crate::raw::{CentreRaw, NotificationRaw, RawTables, SubSiteRaw};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// Single in-process cache so we only parse once per process.
static CENTRE_DB_CACHE: OnceCell<CentreDb<DefaultBackend>> = OnceCell::new();

pub const CENTRES_FILE: &str = "centres.csv";
pub const SUB_SITES_FILE: &str = "sub_sites.csv";
pub const NOTIFICATIONS_CSV_FILE: &str = "communes_notifiees.csv";
#[cfg(feature = "xlsx")]
pub const NOTIFICATIONS_XLSX_FILE: &str = "communes_notifiees.xlsx";

#[cfg(not(feature = "compact"))]
pub const CACHE_FILE: &str = "centremap.bin";
#[cfg(feature = "compact")]
pub const CACHE_FILE: &str = "centremap.bin.gz";

impl CentreDb<DefaultBackend> {
    /// Default data directory: `data/` next to the crate manifest, so demos
    /// work from the repository and from a checkout used as a path dependency.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load the catalog from the default data directory, caching the result
    /// for the lifetime of the process.
    pub fn load() -> Result<Self> {
        CENTRE_DB_CACHE
            .get_or_try_init(|| Self::load_from_dir(Self::default_data_dir()))
            .cloned()
    }

    /// Load the catalog from an explicit data directory, bypassing the
    /// process cache.
    ///
    /// Tries the binary cache file first; on any failure falls back to the
    /// flat sources and best-effort rewrites the cache.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        // 1) Binary cache fast path.
        let cache_path = dir.join(CACHE_FILE);
        if let Ok(bytes) = std::fs::read(&cache_path) {
            match db_from_cache_bytes(&bytes) {
                Ok(db) => {
                    debug!("loaded catalog from cache {}", cache_path.display());
                    return Ok(db);
                }
                Err(e) => warn!("stale cache {} ignored: {e}", cache_path.display()),
            }
        }

        // 2) Flat sources.
        let centres: Vec<CentreRaw> = read_csv_table(&dir.join(CENTRES_FILE), true)?;
        let sub_sites: Vec<SubSiteRaw> = read_csv_table(&dir.join(SUB_SITES_FILE), false)?;
        let notifications = read_notifications(dir)?;

        let db = build_centre_db::<DefaultBackend>(RawTables {
            centres,
            sub_sites,
            notifications,
        });

        // 3) Best-effort: write cache (ignore errors).
        if let Ok(bytes) = db_to_cache_bytes(&db) {
            let _ = std::fs::write(&cache_path, bytes);
        }

        Ok(db)
    }
}

fn db_from_cache_bytes(bytes: &[u8]) -> Result<CentreDb<DefaultBackend>> {
    #[cfg(feature = "compact")]
    {
        use std::io::Read;
        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw)?;
        Ok(bincode::deserialize(&raw)?)
    }
    #[cfg(not(feature = "compact"))]
    {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn db_to_cache_bytes(db: &CentreDb<DefaultBackend>) -> Result<Vec<u8>> {
    let raw = bincode::serialize(db)?;
    #[cfg(feature = "compact")]
    {
        use std::io::Write;
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&raw)?;
        Ok(encoder.finish()?)
    }
    #[cfg(not(feature = "compact"))]
    {
        Ok(raw)
    }
}

/// Read a whole CSV table, skipping (and logging) rows that fail to
/// deserialize. `mandatory` controls whether a missing file is an error or an
/// empty table.
fn read_csv_table<T: DeserializeOwned>(path: &Path, mandatory: bool) -> Result<Vec<T>> {
    if !path.exists() {
        if mandatory {
            return Err(CentreError::NotFound(format!(
                "source table not found at {}",
                path.display()
            )));
        }
        warn!("optional table missing, using empty: {}", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping row {} of {}: {e}", i + 2, path.display()),
        }
    }
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read the commune-notification table: CSV when present, else the legacy
/// workbook (with the `xlsx` feature), else empty.
fn read_notifications(dir: &Path) -> Result<Vec<NotificationRaw>> {
    let csv_path = dir.join(NOTIFICATIONS_CSV_FILE);
    if csv_path.exists() {
        return read_csv_table(&csv_path, false);
    }

    #[cfg(feature = "xlsx")]
    {
        let xlsx_path = dir.join(NOTIFICATIONS_XLSX_FILE);
        if xlsx_path.exists() {
            return read_notifications_xlsx(&xlsx_path);
        }
    }

    warn!("no notification table in {}, joins will miss", dir.display());
    Ok(Vec::new())
}

#[cfg(feature = "xlsx")]
fn read_notifications_xlsx(path: &Path) -> Result<Vec<NotificationRaw>> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CentreError::NotFound(format!("no sheet in {}", path.display())))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_string(c).unwrap_or_default().to_lowercase())
            .collect(),
        None => return Ok(Vec::new()),
    };
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let Some(commune_col) = col("nom_commune") else {
        warn!("{} has no nom_commune column, ignoring", path.display());
        return Ok(Vec::new());
    };
    let lot_col = col("lot");
    let commercial_col = col("fermeture_commerciale");
    let technical_col = col("fermeture_technique");
    let code_col = col("code_oi");
    let name_col = col("nom_oi");

    let cell = |row: &[Data], idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(cell_to_string);

    let mut out = Vec::new();
    for row in rows {
        let Some(commune) = row.get(commune_col).and_then(cell_to_string) else {
            continue;
        };
        out.push(NotificationRaw {
            nom_commune: commune,
            lot: cell(row, lot_col),
            fermeture_commerciale: cell(row, commercial_col),
            fermeture_technique: cell(row, technical_col),
            code_oi: cell(row, code_col),
            nom_oi: cell(row, name_col),
        });
    }
    debug!("read {} rows from {}", out.len(), path.display());
    Ok(out)
}

/// Render a workbook cell as trimmed text; integral floats lose their `.0`
/// so codes like lot numbers survive the spreadsheet round-trip.
#[cfg(feature = "xlsx")]
fn cell_to_string(cell: &calamine::Data) -> Option<String> {
    use calamine::Data;
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
