//! Progress bar for scanned files (verbose CLI runs)

use kdam::{Animation, Bar, BarExt};

/// Bar over `total` files, drawn on stderr. Owned by the thread that drains the outcomes.
pub fn create_progress_bar(total: usize, desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " files"
    )
}

/// Advance the bar by `n`.
pub fn update_progress_bar(pb: &mut Bar, n: usize) {
    let _ = pb.update(n);
}

/// Final redraw so the bar ends at its real position.
pub fn finish_progress_bar(pb: &mut Bar) {
    let _ = pb.refresh();
    eprintln!();
}
