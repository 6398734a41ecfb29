//! Progress reporting for archive-wide operations

use indicatif::{ProgressBar, ProgressStyle};

const ENTRY_TEMPLATE: &str =
    "{prefix:.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} entries {msg}";

/// Progress bar counting archive entries, labelled with the archive name
pub fn create_progress_bar(total: u64, archive: &str) -> ProgressBar {
    let pb = ProgressBar::new(total).with_prefix(archive.to_string());
    pb.set_style(
        ProgressStyle::with_template(ENTRY_TEMPLATE)
            .expect("invalid progress bar template")
            .progress_chars("=> "),
    );
    pb
}
