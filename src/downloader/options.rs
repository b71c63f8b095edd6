//! Download configuration

use std::path::PathBuf;

/// Constant per-run settings handed to the download engine.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Engine format selector: best independent video+audio streams,
    /// falling back to the best combined stream.
    pub format_selector: String,
    /// Container the engine muxes the selected streams into.
    pub container: String,
    /// Directory downloaded files are written to.
    pub destination: PathBuf,
}

impl DownloadOptions {
    /// Engine output template: title-derived file name in the
    /// destination directory.
    pub fn output_template(&self) -> String {
        self.destination
            .join("%(title)s.%(ext)s")
            .to_string_lossy()
            .into_owned()
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            format_selector: "bestvideo+bestaudio/best".to_string(),
            container: "mp4".to_string(),
            destination: dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads")),
        }
    }
}
