//! Shared fixture: a small storage tree built in a temporary directory.
//!
//! ```text
//! root/
//! ├── tracks-index
//! ├── A/g1/{s1,s2}/
//! └── B/g1/{s1,s2}/
//! ```
//!
//! Every sample has `chr1_bw10_g1.db` holding a single segment `(0, 10, 42)`,
//! and `A/g1/s1` additionally has `chr1_bw100_g1.db` with several runs.

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

pub fn write_metadata(sample_dir: &Path, public_id: &str, name: &str, reads: i64, mode: &str) {
    std::fs::create_dir_all(sample_dir).unwrap();
    let conn = Connection::open(sample_dir.join("track.db")).unwrap();
    conn.execute_batch(
        "CREATE TABLE track (public_id TEXT, name TEXT, reads INTEGER, stat_mode TEXT);",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO track VALUES (?1, ?2, ?3, ?4)",
        (public_id, name, reads, mode),
    )
    .unwrap();
}

pub fn write_bins(path: &Path, segments: &[(i64, i64, i64)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE bins (start_bin INTEGER, end_bin INTEGER, reads INTEGER);")
        .unwrap();
    for (start, end, reads) in segments {
        conn.execute("INSERT INTO bins VALUES (?1, ?2, ?3)", (start, end, reads))
            .unwrap();
    }
}

pub fn write_index(root: &Path, rows: &[(&str, &str, &str, &str, i64, &str)]) {
    let conn = Connection::open(root.join("tracks-index")).unwrap();
    conn.execute_batch(
        "CREATE TABLE tracks (public_id TEXT, platform TEXT, genome TEXT, name TEXT,
                              reads INTEGER, stat_mode TEXT, dir TEXT);",
    )
    .unwrap();
    for (id, platform, genome, name, reads, mode) in rows {
        conn.execute(
            "INSERT INTO tracks VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                id,
                platform,
                genome,
                name,
                reads,
                mode,
                format!("{platform}/{genome}/{name}"),
            ),
        )
        .unwrap();
    }
}

pub fn public_id(platform: &str, name: &str) -> String {
    format!("{}-{}", platform.to_lowercase(), name)
}

/// Build the fixture tree. Directories are created in reverse order so the
/// catalog cannot rely on creation order for sorting.
pub fn build_fixture() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let mut index_rows = Vec::new();

    for platform in ["B", "A"] {
        for name in ["s2", "s1"] {
            let dir = root.path().join(platform).join("g1").join(name);
            let id = public_id(platform, name);
            write_metadata(&dir, &id, name, 1000, "count");
            write_bins(&dir.join("chr1_bw10_g1.db"), &[(0, 10, 42)]);
            index_rows.push((id, platform, name));
        }
    }

    write_bins(
        &root.path().join("A/g1/s1/chr1_bw100_g1.db"),
        &[(0, 2, 5), (2, 4, 8), (6, 100, 1)],
    );

    let rows: Vec<_> = index_rows
        .iter()
        .map(|(id, platform, name)| (id.as_str(), *platform, "g1", *name, 1000, "count"))
        .collect();
    write_index(root.path(), &rows);

    root
}
