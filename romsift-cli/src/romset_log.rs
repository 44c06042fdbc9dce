use std::fs;
use std::path::{Path, PathBuf};

use romsift_lib::RomsetSummary;

/// Render a romset summary in the classic log layout.
pub(crate) fn format_romset_log(summary: &RomsetSummary) -> String {
    let mut out = format!("=== {} ===\n", summary.system);
    out.push_str(&format!(
        "=== This romset contains {} of {} known ROMs ===\n\n",
        summary.contained(),
        summary.known()
    ));
    out.push_str("= CONTAINS =\n");
    for clone in &summary.merged {
        out.push_str(clone);
        out.push('\n');
    }
    if !summary.unmerged.is_empty() {
        out.push_str("\n= MISSING =\n");
        for clone in &summary.unmerged {
            out.push_str(clone);
            out.push('\n');
        }
    }
    out
}

/// Write `Log - Romset - <system>.txt` into `dir`, creating it if needed.
pub(crate) fn write_romset_log(dir: &Path, summary: &RomsetSummary) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("Log - Romset - {}.txt", summary.system));
    fs::write(&path, format_romset_log(summary))?;
    Ok(path)
}
