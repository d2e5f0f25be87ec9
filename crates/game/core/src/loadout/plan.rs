//! Declarative loadout plans.

use arrayvec::ArrayVec;

use super::{Item, ResupplyKind, Slot, SlotSet, SpotStatus, StatModifiers};

/// One grant per slot at most.
pub const MAX_GRANTS: usize = 7;

/// One setting per slot and pool at most.
pub const MAX_AMMO_SETTINGS: usize = MAX_GRANTS * 2;

const MAX_RESUPPLIES: usize = 3;

/// Item placed into a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grant {
    pub slot: Slot,
    pub item: Item,
}

/// Which ammunition counter of a slot to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AmmoPool {
    Reserve,
    Magazine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoSetting {
    pub slot: Slot,
    pub pool: AmmoPool,
    pub amount: u32,
}

/// Target equipment state for one player.
///
/// Applying a plan clears `clear` first, then writes grants, resupplies, ammo,
/// stats, heal, focus and spot in that order. Every granted slot is cleared
/// before it is written, so applying the same plan twice leaves the player
/// exactly as applying it once.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutPlan {
    clear: SlotSet,
    grants: ArrayVec<Grant, MAX_GRANTS>,
    resupply: ArrayVec<ResupplyKind, MAX_RESUPPLIES>,
    ammo: ArrayVec<AmmoSetting, MAX_AMMO_SETTINGS>,
    stats: Option<StatModifiers>,
    heal: Option<u32>,
    focus: Option<Slot>,
    spot: Option<(SpotStatus, u32)>,
}

impl LoadoutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds slots to clear before anything is granted.
    pub fn clear(mut self, slots: SlotSet) -> Self {
        self.clear |= slots;
        self
    }

    /// Places `item` in `slot`, replacing an earlier grant for the same slot.
    pub fn grant(mut self, slot: Slot, item: Item) -> Self {
        self.clear |= SlotSet::from(slot);
        match self.grants.iter_mut().find(|grant| grant.slot == slot) {
            Some(existing) => existing.item = item,
            None => self.grants.push(Grant { slot, item }),
        }
        self
    }

    pub fn resupply(mut self, kind: ResupplyKind) -> Self {
        if !self.resupply.contains(&kind) {
            self.resupply.push(kind);
        }
        self
    }

    /// Sets one ammunition counter, replacing an earlier value for it.
    pub fn ammo(mut self, slot: Slot, pool: AmmoPool, amount: u32) -> Self {
        match self
            .ammo
            .iter_mut()
            .find(|setting| setting.slot == slot && setting.pool == pool)
        {
            Some(existing) => existing.amount = amount,
            None => self.ammo.push(AmmoSetting { slot, pool, amount }),
        }
        self
    }

    pub fn stats(mut self, stats: StatModifiers) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn heal(mut self, amount: u32) -> Self {
        self.heal = Some(amount);
        self
    }

    pub fn focus(mut self, slot: Slot) -> Self {
        self.focus = Some(slot);
        self
    }

    pub fn spot(mut self, status: SpotStatus, duration_secs: u32) -> Self {
        self.spot = Some((status, duration_secs));
        self
    }

    pub fn cleared(&self) -> SlotSet {
        self.clear
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    pub fn grant_for(&self, slot: Slot) -> Option<&Item> {
        self.grants
            .iter()
            .find(|grant| grant.slot == slot)
            .map(|grant| &grant.item)
    }

    pub fn resupplies(&self) -> &[ResupplyKind] {
        &self.resupply
    }

    pub fn ammo_settings(&self) -> &[AmmoSetting] {
        &self.ammo
    }

    pub fn stat_modifiers(&self) -> Option<StatModifiers> {
        self.stats
    }

    pub fn heal_amount(&self) -> Option<u32> {
        self.heal
    }

    pub fn focus_slot(&self) -> Option<Slot> {
        self.focus
    }

    pub fn spot_status(&self) -> Option<(SpotStatus, u32)> {
        self.spot
    }

    /// True when the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
