//! Inspect command implementation.

use super::{read_file, CliResult};
use crate::Format;
use scenesync_protocol::{Envelope, HEADER_LENGTH};
use serde::Serialize;
use std::path::Path;

/// Envelope inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Envelope path.
    pub path: String,
    /// Total size in bytes.
    pub size: usize,
    /// Scene version from the header.
    pub scene_version: u32,
    /// IV as lowercase hex.
    pub iv: String,
    /// Ciphertext length in bytes, tag included.
    pub ciphertext_len: usize,
}

/// Reads the header fields of an envelope file.
pub fn inspect(path: &Path) -> CliResult<InspectResult> {
    let bytes = read_file(path)?;
    let envelope = Envelope::decode(&bytes)?;
    Ok(InspectResult {
        path: path.display().to_string(),
        size: bytes.len(),
        scene_version: envelope.scene_version,
        iv: envelope.iv.iter().map(|b| format!("{b:02x}")).collect(),
        ciphertext_len: bytes.len() - HEADER_LENGTH,
    })
}

/// Runs the inspect command.
pub fn run(path: &Path, format: Format) -> CliResult<()> {
    let result = inspect(path)?;
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(scenesync_protocol::ProtocolError::from)?;
            println!("{json}");
        }
        Format::Text => print_text_output(&result),
    }
    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("SceneSync Envelope");
    println!("==================");
    println!();
    println!("Path:          {}", result.path);
    println!("Size:          {} bytes", result.size);
    println!("Scene version: {}", result.scene_version);
    println!("IV:            {}", result.iv);
    println!("Ciphertext:    {} bytes", result.ciphertext_len);
}
