//! Build script for the Spotify profile CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so that a ready-to-fill example sits next to the `.env` file the
//! application reads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// # Destination
///
/// - Linux: `~/.local/share/sprofcli/.env.example`
/// - macOS: `~/Library/Application Support/sprofcli/.env.example`
/// - Windows: `%LOCALAPPDATA%/sprofcli/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sprofcli");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        fs::copy(&template_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
