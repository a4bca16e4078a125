//! Key generation command.

use super::{CliError, CliResult};
use scenesync_core::{EncryptionKey, KeyStrength};

/// Maps a bit size to a key strength.
pub fn strength(bits: u32) -> CliResult<KeyStrength> {
    match bits {
        128 => Ok(KeyStrength::Aes128),
        256 => Ok(KeyStrength::Aes256),
        other => Err(CliError::Usage(format!(
            "unsupported key size {other}, expected 128 or 256"
        ))),
    }
}

/// Runs the keygen command.
pub fn run(bits: u32) -> CliResult<()> {
    let key = EncryptionKey::generate(strength(bits)?);
    println!("{}", key.to_base64url());
    Ok(())
}
