//! Applies loadout plans to the engine.

use game_core::{LoadoutPlan, PlayerId};
use tracing::debug;

use crate::engine::EngineCalls;

/// Turns a [`LoadoutPlan`] into engine calls.
///
/// Runs inside a single worker handler with no await point, so no other event
/// can observe a half-applied loadout.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentReconciler;

impl EquipmentReconciler {
    /// Applies `plan` to `player`. Returns false, doing nothing, when the
    /// player is not valid.
    pub fn apply(engine: &EngineCalls, player: PlayerId, plan: &LoadoutPlan) -> bool {
        if !engine.is_valid(player) {
            debug!(target: "runtime::reconciler", %player, "skipping loadout for invalid player");
            return false;
        }

        for slot in plan.cleared().slots() {
            engine.remove_equipment(player, slot);
        }
        for grant in plan.grants() {
            engine.add_equipment(player, grant.slot, &grant.item);
        }
        for kind in plan.resupplies() {
            engine.resupply(player, *kind);
        }
        for setting in plan.ammo_settings() {
            engine.set_ammo(player, setting.slot, setting.pool, setting.amount);
        }
        if let Some(stats) = plan.stat_modifiers() {
            engine.set_max_health(player, stats.max_health);
            engine.set_speed_multiplier(player, stats.speed_multiplier);
        }
        if let Some(amount) = plan.heal_amount() {
            engine.heal(player, amount);
        }
        if let Some(slot) = plan.focus_slot() {
            engine.force_switch(player, slot);
        }
        if let Some((status, duration_secs)) = plan.spot_status() {
            engine.spot(player, status, duration_secs);
        }
        true
    }
}
