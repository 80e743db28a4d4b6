//! Loading `ViewerConfig` from disk.

use geom_shared::prelude::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("geom_tests_{}_{}.json", std::process::id(), name))
}

#[test]
fn load_reads_partial_config_file() -> anyhow::Result<()> {
    let path = temp_path("partial");
    std::fs::write(&path, r#"{ "tick_hz": 30, "marker": { "radius": 0.2 }, "point": { "x": 1.0, "y": 2.0, "z": 3.0 } }"#)?;

    let cfg = ViewerConfig::load(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(cfg.tick_hz, 30);
    assert_eq!(cfg.marker.radius, 0.2);
    assert_eq!(cfg.marker.subdivision, 12);
    assert_eq!(cfg.point, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(cfg.segment, ViewerConfig::default().segment);
    Ok(())
}

#[test]
fn load_reports_missing_file_with_path() {
    let path = temp_path("missing");
    let err = ViewerConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("read config"));
}

#[test]
fn config_round_trips_through_json() -> anyhow::Result<()> {
    let cfg = ViewerConfig::default();
    let json = serde_json::to_string(&cfg)?;
    assert_eq!(ViewerConfig::from_json_str(&json)?, cfg);
    Ok(())
}
