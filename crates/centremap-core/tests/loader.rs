//! Disk-facing loader tests: sources written to a scratch directory, then
//! driven through the cache fast path, the stale-cache fallback and the
//! degraded branches for missing tables.

use centremap_core::loader::{CACHE_FILE, CENTRES_FILE, NOTIFICATIONS_CSV_FILE, SUB_SITES_FILE};
use centremap_core::prelude::*;
use centremap_core::N_A;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CENTRES_CSV: &str = "\
nom,latitude,longitude,adresse1,adresse2,adresse3,code_postal,nom_ville,commune,region,typologie_cc_long,gestionnaires,enseignes,nb_boutiques,nb_annees_ouverture,surface_gla,polygon,imbs,boutiques_vertes
Créteil Soleil,48.7901,2.4539,101 avenue du Général de Gaulle,,,94000,Créteil,Créteil,Île-de-France,Centre régional,Klépierre,Fnac | Zara,207,50,124000,,\"[['IMB/94028/A/0042', 2.4521, 48.7901]]\",
La Part-Dieu,45.7612,4.8570,17 rue du Docteur Bouchut,,,69003,Lyon,Lyon,Auvergne-Rhône-Alpes,Centre régional,Unibail-Rodamco-Westfield,Zara | Apple,260,48,160000,,,
";

const SUB_SITES_CSV: &str = "\
SITE - Num,SITE - voi,OI,Nb_EL
IMB/94028/A/0042,Avenue de la France Libre,,12
";

const NOTIFICATIONS_CSV: &str = "\
nom_commune,lot,fermeture_commerciale,fermeture_technique,code_oi,nom_oi
Créteil,B2,2025-06,2025-09,CRTL,Orange
";

fn write_sources(dir: &Path) {
    fs::write(dir.join(CENTRES_FILE), CENTRES_CSV).unwrap();
    fs::write(dir.join(SUB_SITES_FILE), SUB_SITES_CSV).unwrap();
    fs::write(dir.join(NOTIFICATIONS_CSV_FILE), NOTIFICATIONS_CSV).unwrap();
}

#[test]
fn load_writes_cache_and_reuses_it() {
    let dir = tempdir().expect("tempdir");
    write_sources(dir.path());

    let db = DefaultCentreDb::load_from_dir(dir.path()).unwrap();
    assert_eq!(db.stats().centres, 2);
    assert_eq!(db.stats().sub_sites, 1);
    assert_eq!(db.stats().notifications, 1);
    assert!(dir.path().join(CACHE_FILE).exists());

    // With the sources gone the second load can only come from the cache.
    fs::remove_file(dir.path().join(CENTRES_FILE)).unwrap();
    fs::remove_file(dir.path().join(SUB_SITES_FILE)).unwrap();
    fs::remove_file(dir.path().join(NOTIFICATIONS_CSV_FILE)).unwrap();

    let cached = DefaultCentreDb::load_from_dir(dir.path()).unwrap();
    assert_eq!(cached.stats(), db.stats());
    assert_eq!(cached.centres[0].name(), "Créteil Soleil");
    assert_eq!(cached.notification_for_commune("Créteil").lot, "B2");
}

#[test]
fn stale_cache_falls_back_to_sources() {
    let dir = tempdir().expect("tempdir");
    write_sources(dir.path());
    fs::write(dir.path().join(CACHE_FILE), b"not a cache").unwrap();

    let db = DefaultCentreDb::load_from_dir(dir.path()).unwrap();
    assert_eq!(db.stats().centres, 2);

    // The garbage file was replaced by a good cache on the way out.
    let rewritten = fs::read(dir.path().join(CACHE_FILE)).unwrap();
    assert_ne!(&rewritten[..], b"not a cache");
}

#[test]
fn missing_optional_tables_degrade_to_empty() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join(CENTRES_FILE), CENTRES_CSV).unwrap();

    let db = DefaultCentreDb::load_from_dir(dir.path()).unwrap();
    assert_eq!(db.stats().centres, 2);
    assert_eq!(db.stats().sub_sites, 0);
    assert_eq!(db.stats().notifications, 0);

    // Every enrichment join misses.
    assert_eq!(db.sub_site_info("IMB/94028/A/0042").operator, N_A);
    assert_eq!(db.notification_for_commune("Créteil").lot, N_A);
}

#[test]
fn missing_site_catalog_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = DefaultCentreDb::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CentreError::NotFound(_)));
}
