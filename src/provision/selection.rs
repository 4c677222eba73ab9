use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::ImageRecord;

/// Map an arbitrary numeric request onto a provision count.
/// Non-finite and non-positive values become 0.
pub fn requested_count(raw: f64) -> i64 {
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else {
        raw.floor() as i64
    }
}

/// Draw `count` images from `pool` in uniformly random order.
///
/// When the pool is too small the whole shuffled pool is followed by padding
/// taken from the same shuffled order, cycling from the start. The pool
/// itself is never reordered.
pub fn select_images<R: Rng + ?Sized>(
    pool: &[ImageRecord],
    count: i64,
    rng: &mut R,
) -> Vec<ImageRecord> {
    if count <= 0 || pool.is_empty() {
        return Vec::new();
    }
    let count = usize::try_from(count).unwrap_or(usize::MAX);

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);

    if count <= shuffled.len() {
        shuffled.truncate(count);
        return shuffled;
    }

    let padding: Vec<ImageRecord> = shuffled
        .iter()
        .cycle()
        .take(count - shuffled.len())
        .cloned()
        .collect();
    shuffled.extend(padding);
    shuffled
}

/// Reorder a selection into non-decreasing difficulty tiers, shuffling
/// within each tier.
pub fn balance_difficulty<R: Rng + ?Sized>(
    images: Vec<ImageRecord>,
    rng: &mut R,
) -> Vec<ImageRecord> {
    images
        .into_iter()
        .into_group_map_by(|image| image.difficulty)
        .into_iter()
        .sorted_by_key(|(difficulty, _)| *difficulty)
        .flat_map(|(_, mut tier)| {
            tier.shuffle(rng);
            tier
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_image;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(n: u32) -> Vec<ImageRecord> {
        (1..=n)
            .map(|id| test_image(id, &format!("answer{id}"), (id % 5 + 1) as u8))
            .collect()
    }

    #[test]
    fn test_requested_count() {
        assert_eq!(requested_count(10.0), 10);
        assert_eq!(requested_count(3.9), 3);
        assert_eq!(requested_count(0.0), 0);
        assert_eq!(requested_count(-5.0), 0);
        assert_eq!(requested_count(f64::NAN), 0);
        assert_eq!(requested_count(f64::INFINITY), 0);
        assert_eq!(requested_count(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_select_prefix_is_distinct() {
        let pool = pool(20);
        let mut rng = StdRng::seed_from_u64(7);

        let selected = select_images(&pool, 10, &mut rng);

        assert_eq!(selected.len(), 10);
        let ids: HashSet<u32> = selected.iter().map(|img| img.id).collect();
        assert_eq!(ids.len(), 10);
        assert!(selected.iter().all(|img| pool.contains(img)));
    }

    #[test]
    fn test_select_does_not_touch_pool() {
        let pool = pool(15);
        let before = pool.clone();
        let mut rng = StdRng::seed_from_u64(1);

        let _ = select_images(&pool, 15, &mut rng);

        assert_eq!(pool, before);
    }

    #[test]
    fn test_select_pads_by_cycling_shuffled_order() {
        let pool = pool(4);
        let mut rng = StdRng::seed_from_u64(42);

        let selected = select_images(&pool, 10, &mut rng);

        assert_eq!(selected.len(), 10);
        for i in 4..10 {
            assert_eq!(selected[i], selected[i % 4]);
        }
        let ids: HashSet<u32> = selected[..4].iter().map(|img| img.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_select_padding_counts() {
        let pool = pool(3);
        let mut rng = StdRng::seed_from_u64(3);

        let selected = select_images(&pool, 8, &mut rng);

        // floor(8/3) = 2 copies each, first 8 mod 3 = 2 entries get one extra
        let counts = selected.iter().counts_by(|img| img.id);
        assert!(counts.values().all(|c| *c >= 2));
        assert_eq!(counts.values().filter(|c| **c == 3).count(), 2);
        assert_eq!(counts[&selected[0].id], 3);
        assert_eq!(counts[&selected[1].id], 3);
    }

    #[test]
    fn test_select_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(select_images(&pool(5), 0, &mut rng).is_empty());
        assert!(select_images(&pool(5), -5, &mut rng).is_empty());
        assert!(select_images(&[], 10, &mut rng).is_empty());
    }

    #[test]
    fn test_select_every_position_reachable() {
        // Each image should be able to land first; a biased shuffle would starve some.
        let pool = pool(4);
        let mut rng = StdRng::seed_from_u64(99);
        let mut firsts = HashSet::new();

        for _ in 0..200 {
            firsts.insert(select_images(&pool, 1, &mut rng)[0].id);
        }

        assert_eq!(firsts.len(), 4);
    }

    #[test]
    fn test_balance_difficulty_orders_tiers() {
        let mut rng = StdRng::seed_from_u64(5);
        let selected = select_images(&pool(20), 10, &mut rng);
        let mut before_ids: Vec<u32> = selected.iter().map(|img| img.id).collect();

        let balanced = balance_difficulty(selected, &mut rng);

        assert_eq!(balanced.len(), 10);
        assert!(balanced
            .windows(2)
            .all(|pair| pair[0].difficulty <= pair[1].difficulty));
        let mut after_ids: Vec<u32> = balanced.iter().map(|img| img.id).collect();
        before_ids.sort_unstable();
        after_ids.sort_unstable();
        assert_eq!(before_ids, after_ids);
    }

    #[test]
    fn test_balance_difficulty_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(balance_difficulty(Vec::new(), &mut rng).is_empty());
    }
}
