use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use crate::api::client::ClientError;
use crate::transfer::progress;

/// Extract a downloaded zip bundle into `dest`, advancing a file-count
/// bar per entry. Entries whose names escape `dest` are skipped.
///
/// Returns the number of files written.
pub fn extract_bundle(
    data: Vec<u8>,
    dest: &Path,
    show_progress: bool,
) -> Result<usize, ClientError> {
    let mut bundle = ZipArchive::new(Cursor::new(data))?;

    let pb = progress::files_bar(bundle.len() as u64, show_progress);
    let mut extracted = 0;

    for i in 0..bundle.len() {
        let mut entry = bundle.by_index(i)?;

        let relative = match entry.enclosed_name() {
            Some(name) => name,
            None => {
                log::warn!("skipping bundle entry with unsafe path: {}", entry.name());
                pb.inc(1);
                continue;
            }
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = std::fs::File::create(&out_path)?;
            std::io::copy(&mut entry, &mut out)?;
            extracted += 1;
        }
        pb.inc(1);
    }
    pb.finish();

    Ok(extracted)
}
