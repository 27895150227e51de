use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::pdf::RenderedCertificate;

static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

/// `Certificate_<name>.pdf`, with every character outside `[A-Za-z0-9]`
/// replaced by `_` and the result lower-cased.
pub fn certificate_filename(student_name: &str) -> String {
    let re = UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
    let safe = re.replace_all(student_name, "_").to_ascii_lowercase();
    format!("Certificate_{}.pdf", safe)
}

pub fn ensure_dir(folder: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(folder)
}

/// Writes the certificate into `folder`, replacing any previous file of the
/// same name.
pub fn save(folder: &Path, certificate: &RenderedCertificate) -> std::io::Result<PathBuf> {
    ensure_dir(folder)?;
    let path = folder.join(&certificate.filename);
    std::fs::write(&path, &certificate.bytes)?;
    Ok(path)
}
