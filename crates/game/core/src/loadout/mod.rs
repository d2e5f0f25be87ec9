//! Equipment vocabulary and loadout plans.
//!
//! The modes never talk to the engine about equipment directly. They describe
//! the wanted end state as a [`LoadoutPlan`] and the runtime's reconciler
//! applies it. Weapon identities are opaque: the engine maps [`WeaponId`]s to
//! concrete weapons.

mod attachments;
mod plan;

pub use attachments::{
    Attachment, AttachmentCategory, AttachmentProfile, CATEGORY_COUNT, WeaponPackage,
};
pub use plan::{AmmoPool, AmmoSetting, Grant, LoadoutPlan, MAX_AMMO_SETTINGS, MAX_GRANTS};

use std::fmt;

/// Opaque weapon identifier resolved by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponId(pub u32);

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weapon:{}", self.0)
    }
}

/// Gadgets and melee items the modes hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Gadget {
    CombatKnife,
    ThrowingKnife,
    RocketLauncher,
    AdrenalineInjector,
    FlashGrenade,
    DeployableCover,
    SupplyPouch,
}

/// Inventory slots, in the order the reconciler clears them.
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
pub enum Slot {
    Primary,
    Secondary,
    GadgetOne,
    GadgetTwo,
    ClassGadget,
    Throwable,
    Melee,
}

bitflags::bitflags! {
    /// Set of inventory slots.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SlotSet: u8 {
        const PRIMARY      = 1 << 0;
        const SECONDARY    = 1 << 1;
        const GADGET_ONE   = 1 << 2;
        const GADGET_TWO   = 1 << 3;
        const CLASS_GADGET = 1 << 4;
        const THROWABLE    = 1 << 5;
        const MELEE        = 1 << 6;
    }
}

impl SlotSet {
    /// Every slot except melee.
    pub const LOADOUT: Self = Self::PRIMARY
        .union(Self::SECONDARY)
        .union(Self::GADGET_ONE)
        .union(Self::GADGET_TWO)
        .union(Self::CLASS_GADGET)
        .union(Self::THROWABLE);

    /// Slots in clearing order.
    pub fn slots(self) -> impl Iterator<Item = Slot> {
        use strum::IntoEnumIterator;
        Slot::iter().filter(move |slot| self.contains(SlotSet::from(*slot)))
    }
}

impl From<Slot> for SlotSet {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Primary => Self::PRIMARY,
            Slot::Secondary => Self::SECONDARY,
            Slot::GadgetOne => Self::GADGET_ONE,
            Slot::GadgetTwo => Self::GADGET_TWO,
            Slot::ClassGadget => Self::CLASS_GADGET,
            Slot::Throwable => Self::THROWABLE,
            Slot::Melee => Self::MELEE,
        }
    }
}

/// Something that occupies a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Weapon {
        weapon: WeaponId,
        package: Option<WeaponPackage>,
    },
    Gadget(Gadget),
}

impl Item {
    pub fn weapon(weapon: WeaponId, package: Option<WeaponPackage>) -> Self {
        Self::Weapon { weapon, package }
    }
}

/// Engine resupply sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResupplyKind {
    AmmoBox,
    AmmoCrate,
    SupplyBag,
}

/// Where a spotted player shows up for everyone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpotStatus {
    Minimap,
    MinimapAndWorld,
}

/// Per-life stat modifiers. Absolute values, not deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    pub max_health: u32,
    pub speed_multiplier: f32,
}

impl StatModifiers {
    pub const BASELINE: Self = Self {
        max_health: 100,
        speed_multiplier: 1.0,
    };

    pub const fn new(max_health: u32, speed_multiplier: f32) -> Self {
        Self {
            max_health,
            speed_multiplier,
        }
    }
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self::BASELINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_set_iterates_in_clearing_order() {
        let set = SlotSet::MELEE | SlotSet::PRIMARY | SlotSet::THROWABLE;

        let slots: Vec<_> = set.slots().collect();
        assert_eq!(slots, vec![Slot::Primary, Slot::Throwable, Slot::Melee]);
    }

    #[test]
    fn loadout_set_excludes_melee() {
        assert!(!SlotSet::LOADOUT.contains(SlotSet::MELEE));
        assert_eq!(SlotSet::LOADOUT.slots().count(), 6);
        assert_eq!(SlotSet::all().slots().count(), <Slot as strum::EnumCount>::COUNT);
    }
}
