//! Seal command implementation.

use super::{parse_key, read_elements, write_file, CliResult};
use scenesync_core::{restore_elements, scene_version, RoomCipher};
use std::path::Path;
use tracing::info;

/// Encrypts the collection in `elements_path` into an envelope at `output`.
///
/// Returns the scene version written to the header.
pub fn seal(elements_path: &Path, key: &str, output: &Path) -> CliResult<u64> {
    let key = parse_key(key)?;
    let cipher = RoomCipher::new(&key)?;
    let elements = restore_elements(read_elements(elements_path)?);

    let envelope = scenesync_protocol::seal(&elements, &cipher)?;
    write_file(output, &envelope.encode())?;

    let version = scene_version(&elements);
    info!(elements = elements.len(), scene_version = version, "sealed scene");
    Ok(version)
}

/// Runs the seal command.
pub fn run(elements_path: &Path, key: &str, output: &Path) -> CliResult<()> {
    let version = seal(elements_path, key, output)?;
    println!("Sealed scene version {version} to {}", output.display());
    Ok(())
}
