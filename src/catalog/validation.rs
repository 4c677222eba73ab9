use std::collections::{BTreeMap, HashSet};

use super::ImageRecord;

/// Smallest pool that can fill a session without repeats
pub const MIN_POOL_SIZE: usize = 10;

/// Integrity report for a set of images
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_images: usize,
    pub difficulty_distribution: BTreeMap<u8, usize>,
}

pub fn validate_pool(images: &[ImageRecord]) -> PoolValidation {
    let mut report = PoolValidation {
        is_valid: true,
        total_images: images.len(),
        ..Default::default()
    };

    if images.len() < MIN_POOL_SIZE {
        report.errors.push(format!(
            "Image pool has {} images but minimum required is {}",
            images.len(),
            MIN_POOL_SIZE
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_answers = HashSet::new();

    for image in images {
        if !seen_ids.insert(image.id) {
            report
                .errors
                .push(format!("Duplicate image ID found: {}", image.id));
        }

        if !seen_answers.insert(image.normalized_answer()) {
            report
                .warnings
                .push(format!("Duplicate answer found: \"{}\"", image.answer));
        }

        if image.url.trim().is_empty() {
            report
                .errors
                .push(format!("Invalid URL for image ID {}", image.id));
        }

        if image.answer.trim().is_empty() {
            report
                .errors
                .push(format!("Invalid answer for image ID {}", image.id));
        }

        if !(1..=5).contains(&image.difficulty) {
            report.errors.push(format!(
                "Invalid difficulty for image ID {}: must be between 1 and 5",
                image.id
            ));
        }

        *report
            .difficulty_distribution
            .entry(image.difficulty)
            .or_insert(0) += 1;
    }

    check_distribution(&mut report);

    report.is_valid = report.errors.is_empty();
    report
}

fn check_distribution(report: &mut PoolValidation) {
    let (Some(&min), Some(&max)) = (
        report.difficulty_distribution.keys().next(),
        report.difficulty_distribution.keys().next_back(),
    ) else {
        return;
    };

    if max - min < 2 && report.total_images >= MIN_POOL_SIZE {
        report.warnings.push(format!(
            "Limited difficulty range ({min}-{max}). Consider adding images with varied difficulty levels."
        ));
    }

    let avg_per_tier = report.total_images as f64 / report.difficulty_distribution.len() as f64;
    for (difficulty, count) in &report.difficulty_distribution {
        if (*count as f64) < avg_per_tier * 0.3 {
            report.warnings.push(format!(
                "Difficulty level {difficulty} has only {count} images, which may cause poor distribution in games."
            ));
        }
    }
}
