//! Merge command implementation.

use super::{read_elements, to_json, CliResult};
use scenesync_core::{reconcile_with_stats, restore_elements, scene_version, Element};
use std::path::Path;
use tracing::info;

/// Reconciles two collection files.
pub fn merge(local: &Path, remote: &Path) -> CliResult<Vec<Element>> {
    let local = restore_elements(read_elements(local)?);
    let remote = restore_elements(read_elements(remote)?);
    let (merged, stats) = reconcile_with_stats(&local, &remote);
    info!(
        kept = stats.kept_local,
        replaced = stats.replaced_by_remote,
        added = stats.added_from_remote,
        scene_version = scene_version(&merged),
        "merged collections"
    );
    Ok(merged)
}

/// Runs the merge command.
pub fn run(local: &Path, remote: &Path) -> CliResult<()> {
    let merged = merge(local, remote)?;
    println!("{}", to_json(&merged)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_files() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.json");
        let remote = dir.path().join("remote.json");
        std::fs::write(
            &local,
            br#"[{"id":"a","version":1,"type":"rectangle"},{"id":"b","version":4}]"#,
        )
        .unwrap();
        std::fs::write(
            &remote,
            br#"[{"id":"c","version":1},{"id":"a","version":2,"type":"ellipse"}]"#,
        )
        .unwrap();

        let merged = merge(&local, &remote).unwrap();
        let ids: Vec<_> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged[0].kind(), Some("ellipse"));
    }
}
