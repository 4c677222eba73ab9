pub mod report;
pub mod selection;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ImageRecord};

pub use report::{select_with_report, SelectionReport, MAX_DUPLICATES_ALLOWED};
pub use selection::{balance_difficulty, requested_count, select_images};

/// Source of a session's ordered level sequence
pub trait ImageProvisioner {
    /// Return `count` images; non-positive counts yield an empty sequence.
    /// `Game::start` repeats a shorter sequence to fill every level.
    fn provision(&mut self, count: i64) -> Vec<ImageRecord>;
}

/// How a session's images are drawn from the catalog
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// uniform random order
    Random,
    /// random draw, then ordered from easy to hard
    Balanced,
    /// catalog order, repeating if needed
    InOrder,
}

/// Build the provisioner for `selection`. A seed makes the draw reproducible.
pub fn build_provisioner(
    selection: Selection,
    catalog: Catalog,
    seed: Option<u64>,
) -> Box<dyn ImageProvisioner> {
    match selection {
        Selection::Random => Box::new(RandomProvisioner::with_seed(catalog, seed)),
        Selection::Balanced => Box::new(BalancedProvisioner::new(RandomProvisioner::with_seed(
            catalog, seed,
        ))),
        Selection::InOrder => Box::new(FixedProvisioner::new(catalog.images().to_vec())),
    }
}

/// Uniform random selection over a catalog
pub struct RandomProvisioner {
    catalog: Catalog,
    rng: StdRng,
}

impl RandomProvisioner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_seed(catalog: Catalog, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(catalog, seed),
            None => Self::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl ImageProvisioner for RandomProvisioner {
    fn provision(&mut self, count: i64) -> Vec<ImageRecord> {
        let report = select_with_report(
            self.catalog.images(),
            count,
            MAX_DUPLICATES_ALLOWED,
            &mut self.rng,
        );
        for warning in &report.warnings {
            tracing::warn!(catalog = self.catalog.name(), "{warning}");
        }
        tracing::debug!(
            catalog = self.catalog.name(),
            requested = count,
            provided = report.images.len(),
            "provisioned images"
        );
        report.images
    }
}

/// Random selection reordered into easy-to-hard difficulty tiers
pub struct BalancedProvisioner {
    inner: RandomProvisioner,
}

impl BalancedProvisioner {
    pub fn new(inner: RandomProvisioner) -> Self {
        Self { inner }
    }
}

impl ImageProvisioner for BalancedProvisioner {
    fn provision(&mut self, count: i64) -> Vec<ImageRecord> {
        let selected = self.inner.provision(count);
        balance_difficulty(selected, &mut self.inner.rng)
    }
}

/// Hands out a pre-ordered sequence, cycling when more is requested
pub struct FixedProvisioner {
    images: Vec<ImageRecord>,
}

impl FixedProvisioner {
    pub fn new(images: Vec<ImageRecord>) -> Self {
        Self { images }
    }
}

impl ImageProvisioner for FixedProvisioner {
    fn provision(&mut self, count: i64) -> Vec<ImageRecord> {
        let count = usize::try_from(count).unwrap_or(0);
        self.images.iter().cycle().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_image;
    use std::collections::HashSet;

    fn catalog(n: u32) -> Catalog {
        let images = (1..=n)
            .map(|id| test_image(id, &format!("a{id}"), (id % 5 + 1) as u8))
            .collect();
        Catalog::from_images("test", images).unwrap()
    }

    #[test]
    fn test_random_provisioner_distinct() {
        let mut provisioner = RandomProvisioner::seeded(catalog(30), 11);

        let images = provisioner.provision(10);

        assert_eq!(images.len(), 10);
        let ids: HashSet<u32> = images.iter().map(|img| img.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_random_provisioner_seed_is_reproducible() {
        let mut a = RandomProvisioner::seeded(catalog(30), 3);
        let mut b = RandomProvisioner::seeded(catalog(30), 3);

        assert_eq!(a.provision(10), b.provision(10));
    }

    #[test]
    fn test_random_provisioner_pads_small_catalog() {
        let mut provisioner = RandomProvisioner::seeded(catalog(4), 3);

        let images = provisioner.provision(10);

        assert_eq!(images.len(), 10);
        let ids: HashSet<u32> = images.iter().map(|img| img.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_random_provisioner_leaves_catalog_order() {
        let mut provisioner = RandomProvisioner::seeded(catalog(10), 8);
        let before: Vec<u32> = provisioner.catalog().images().iter().map(|i| i.id).collect();

        let _ = provisioner.provision(10);

        let after: Vec<u32> = provisioner.catalog().images().iter().map(|i| i.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_balanced_provisioner_non_decreasing() {
        let mut provisioner = BalancedProvisioner::new(RandomProvisioner::seeded(catalog(40), 21));

        let images = provisioner.provision(10);

        assert_eq!(images.len(), 10);
        assert!(images.windows(2).all(|w| w[0].difficulty <= w[1].difficulty));
    }

    #[test]
    fn test_fixed_provisioner_cycles() {
        let images: Vec<ImageRecord> = (1..=3).map(|id| test_image(id, "x", 1)).collect();
        let mut provisioner = FixedProvisioner::new(images);

        let ids: Vec<u32> = provisioner.provision(5).iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![1, 2, 3, 1, 2]);
        assert!(provisioner.provision(0).is_empty());
        assert!(provisioner.provision(-2).is_empty());
    }

    #[test]
    fn test_build_provisioner_in_order() {
        let mut provisioner = build_provisioner(Selection::InOrder, catalog(12), None);

        let ids: Vec<u32> = provisioner.provision(3).iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::Random.to_string(), "Random");
        assert_eq!(Selection::Balanced.to_string(), "Balanced");
        assert_eq!(Selection::InOrder.to_string(), "InOrder");
    }
}
