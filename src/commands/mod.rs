//! CLI commands implementation

pub mod classify;
pub mod clean;
pub mod corrections;
pub mod init;
pub mod patterns;
pub mod score;
pub mod status;

pub use classify::*;
pub use clean::*;
pub use corrections::*;
pub use init::*;
pub use patterns::*;
pub use score::*;
pub use status::*;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub(crate) fn start_progress_bar(len: usize, message: &str) -> Option<ProgressBar> {
    if len == 0 {
        return None;
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

pub(crate) fn advance_progress(pb: &Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

pub(crate) fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}
