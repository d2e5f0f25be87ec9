//! Attachment categories and correlated package rolls.

use arrayvec::ArrayVec;

use crate::env::{RngOracle, RollStream};

/// Number of attachment categories.
pub const CATEGORY_COUNT: usize = 7;

/// Disjoint attachment categories a weapon package can draw from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttachmentCategory {
    Sight,
    Barrel,
    Underbarrel,
    Muzzle,
    Ammo,
    Top,
    Ergo,
}

impl AttachmentCategory {
    /// Size of the category's pool. Variant indices are `0..variants()`.
    pub const fn variants(self) -> u8 {
        match self {
            Self::Sight => 8,
            Self::Barrel => 4,
            Self::Underbarrel => 7,
            Self::Muzzle => 7,
            Self::Ammo => 4,
            Self::Top => 5,
            Self::Ergo => 3,
        }
    }
}

/// One attachment: a category plus the index of the variant within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    pub category: AttachmentCategory,
    pub variant: u8,
}

/// Attachments bound to one weapon for one player's life.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponPackage {
    attachments: ArrayVec<Attachment, CATEGORY_COUNT>,
}

impl WeaponPackage {
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn get(&self, category: AttachmentCategory) -> Option<Attachment> {
        self.attachments
            .iter()
            .copied()
            .find(|attachment| attachment.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }
}

/// Per-category enable thresholds for package rolls.
///
/// A roll draws ONE uniform value for the whole weapon and enables every
/// category whose threshold it exceeds, in profile order. Categories are
/// therefore correlated: a draw that enables a high-threshold category has
/// enabled every lower-threshold one too. Each enabled category then picks its
/// variant with its own draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentProfile {
    thresholds: ArrayVec<(AttachmentCategory, f64), CATEGORY_COUNT>,
}

impl AttachmentProfile {
    /// Builds a profile. Later duplicates of a category are ignored.
    pub fn new(thresholds: &[(AttachmentCategory, f64)]) -> Self {
        let mut kept: ArrayVec<(AttachmentCategory, f64), CATEGORY_COUNT> = ArrayVec::new();
        for &(category, threshold) in thresholds {
            if kept.iter().any(|(seen, _)| *seen == category) {
                continue;
            }
            kept.push((category, threshold));
        }
        Self { thresholds: kept }
    }

    /// Cranked spawn packages.
    pub fn cranked() -> Self {
        use AttachmentCategory::*;
        Self::new(&[
            (Sight, 0.1),
            (Barrel, 0.2),
            (Underbarrel, 0.3),
            (Muzzle, 0.4),
            (Ammo, 0.5),
            (Top, 0.5),
        ])
    }

    /// Gun Game per-tier packages.
    pub fn gun_game() -> Self {
        use AttachmentCategory::*;
        Self::new(&[
            (Sight, 0.2),
            (Barrel, 0.4),
            (Underbarrel, 0.5),
            (Muzzle, 0.6),
            (Ammo, 0.6),
        ])
    }

    pub fn thresholds(&self) -> &[(AttachmentCategory, f64)] {
        &self.thresholds
    }

    /// Rolls one package: one shared draw, then one variant draw per enabled
    /// category.
    pub fn roll<R: RngOracle>(&self, rolls: &mut RollStream<R>) -> WeaponPackage {
        let chance = rolls.next_unit();
        self.roll_with_chance(chance, rolls)
    }

    /// Same as [`roll`](Self::roll) with the shared draw supplied.
    pub fn roll_with_chance<R: RngOracle>(
        &self,
        chance: f64,
        rolls: &mut RollStream<R>,
    ) -> WeaponPackage {
        let mut package = WeaponPackage::default();
        for &(category, threshold) in &self.thresholds {
            if chance > threshold {
                let variant = rolls.pick_index(usize::from(category.variants())) as u8;
                package.attachments.push(Attachment { category, variant });
            }
        }
        package
    }

    /// Rolls one package per weapon, in weapon order.
    pub fn roll_many<R: RngOracle>(
        &self,
        weapons: usize,
        rolls: &mut RollStream<R>,
    ) -> Vec<WeaponPackage> {
        (0..weapons).map(|_| self.roll(rolls)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    fn categories(package: &WeaponPackage) -> Vec<AttachmentCategory> {
        package.attachments().iter().map(|a| a.category).collect()
    }

    #[test]
    fn category_count_matches_enum() {
        assert_eq!(CATEGORY_COUNT, AttachmentCategory::COUNT);
    }

    #[test]
    fn shared_draw_enables_every_cheaper_category() {
        use AttachmentCategory::*;
        let profile = AttachmentProfile::cranked();
        let mut rolls = RollStream::new(9, 0, 1);

        let package = profile.roll_with_chance(0.35, &mut rolls);

        assert_eq!(categories(&package), vec![Sight, Barrel, Underbarrel]);
    }

    #[test]
    fn threshold_is_strict() {
        use AttachmentCategory::*;
        let profile = AttachmentProfile::gun_game();
        let mut rolls = RollStream::new(9, 0, 1);

        let at_threshold = profile.roll_with_chance(0.6, &mut rolls);
        assert_eq!(categories(&at_threshold), vec![Sight, Barrel, Underbarrel]);

        let above = profile.roll_with_chance(0.61, &mut rolls);
        assert_eq!(
            categories(&above),
            vec![Sight, Barrel, Underbarrel, Muzzle, Ammo]
        );
    }

    #[test]
    fn low_draw_rolls_bare_weapon() {
        let profile = AttachmentProfile::cranked();
        let mut rolls = RollStream::new(9, 0, 1);

        assert!(profile.roll_with_chance(0.05, &mut rolls).is_empty());
    }

    #[test]
    fn variants_stay_within_pools() {
        let profile = AttachmentProfile::new(
            &AttachmentCategory::iter()
                .map(|category| (category, 0.0))
                .collect::<Vec<_>>(),
        );
        let mut rolls = RollStream::new(3, 1, 2);

        for package in profile.roll_many(200, &mut rolls) {
            for attachment in package.attachments() {
                assert!(attachment.variant < attachment.category.variants());
            }
        }
    }

    #[test]
    fn rolls_are_reproducible() {
        let profile = AttachmentProfile::gun_game();

        let first = profile.roll_many(17, &mut RollStream::new(77, 4, 12));
        let second = profile.roll_many(17, &mut RollStream::new(77, 4, 12));

        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_categories_are_ignored() {
        use AttachmentCategory::*;
        let profile = AttachmentProfile::new(&[(Sight, 0.1), (Sight, 0.9), (Ammo, 0.5)]);

        assert_eq!(profile.thresholds(), &[(Sight, 0.1), (Ammo, 0.5)]);
    }
}
