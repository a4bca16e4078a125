//! Open command implementation.

use super::{parse_key, read_file, to_json, CliResult};
use scenesync_core::{restore_elements, Element, RoomCipher};
use scenesync_protocol::Envelope;
use std::path::Path;

/// Decrypts an envelope file.
pub fn open(path: &Path, key: &str) -> CliResult<Vec<Element>> {
    let cipher = RoomCipher::new(&parse_key(key)?)?;
    let bytes = read_file(path)?;
    let envelope = Envelope::decode(&bytes)?;
    Ok(restore_elements(scenesync_protocol::open(
        &envelope, &cipher,
    )?))
}

/// Runs the open command.
pub fn run(path: &Path, key: &str) -> CliResult<()> {
    let elements = open(path, key)?;
    println!("{}", to_json(&elements)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CliError;
    use scenesync_core::{CoreError, EncryptionKey, KeyStrength};
    use scenesync_protocol::ProtocolError;
    use scenesync_testkit::{fixed_key, sample_scene, sealed_scene};

    #[test]
    fn wrong_key_fails_authentication() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.bin");
        std::fs::write(&path, sealed_scene(&sample_scene(), &fixed_key())).unwrap();
        let other = EncryptionKey::generate(KeyStrength::Aes128).to_base64url();

        assert!(matches!(
            open(&path, &other),
            Err(CliError::Protocol(ProtocolError::Crypto(
                CoreError::Authentication { .. }
            )))
        ));
    }
}
