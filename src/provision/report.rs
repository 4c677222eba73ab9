use rand::Rng;

use super::selection::select_images;
use crate::catalog::ImageRecord;

/// Padding beyond this many repeats is called out in the warning text
pub const MAX_DUPLICATES_ALLOWED: usize = 5;

/// Selection result plus what had to be done to satisfy the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionReport {
    pub images: Vec<ImageRecord>,
    pub had_insufficient_images: bool,
    pub duplicates_used: usize,
    pub warnings: Vec<String>,
}

pub fn select_with_report<R: Rng + ?Sized>(
    pool: &[ImageRecord],
    count: i64,
    max_duplicates_allowed: usize,
    rng: &mut R,
) -> SelectionReport {
    let mut report = SelectionReport {
        images: select_images(pool, count, rng),
        ..Default::default()
    };

    let requested = usize::try_from(count).unwrap_or(0);
    if requested > pool.len() && !pool.is_empty() {
        report.had_insufficient_images = true;
        report.duplicates_used = requested - pool.len();

        let mut warning = format!(
            "Requested {} images but only {} available. Using {} duplicates",
            requested,
            pool.len(),
            report.duplicates_used
        );
        if report.duplicates_used > max_duplicates_allowed {
            warning.push_str(&format!(" (exceeds max allowed: {max_duplicates_allowed})"));
        }
        warning.push('.');
        report.warnings.push(warning);
    }

    report
}
