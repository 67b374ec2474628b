//! Progress bar construction for transfers.
//!
//! Bars render to stderr. When `visible` is false (tests, quiet clients)
//! a hidden bar with the same length is returned, so position accounting
//! behaves identically either way.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

fn bytes_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
        .unwrap()
        .progress_chars("=>-")
}

fn files_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
        .unwrap()
        .progress_chars("=>-")
}

/// Byte-denominated bar for uploads and downloads.
pub fn bytes_bar(total: u64, msg: String, visible: bool) -> ProgressBar {
    let pb = new_bar(total, visible);
    pb.set_style(bytes_style());
    pb.set_message(msg);
    pb
}

/// File-count bar for bundle extraction.
pub fn files_bar(total: u64, visible: bool) -> ProgressBar {
    let pb = new_bar(total, visible);
    pb.set_style(files_style());
    pb.set_message("Extracting");
    pb
}

fn new_bar(total: u64, visible: bool) -> ProgressBar {
    if visible {
        ProgressBar::new(total)
    } else {
        ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
    }
}
