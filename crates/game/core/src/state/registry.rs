//! Player registry owning per-mode progression records.

use std::collections::BTreeMap;

use crate::state::PlayerId;

/// Mapping from player identity to one mode's progression record.
///
/// Records are created on join, reset in place and removed only on leave. Iteration follows player id order so that scans such as
/// team assignment or last-player-standing are deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRegistry<S> {
    records: BTreeMap<PlayerId, S>,
}

impl<S> PlayerRegistry<S> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Registers `player`, replacing any stale record left under the same id.
    pub fn join(&mut self, player: PlayerId, record: S) -> Option<S> {
        self.records.insert(player, record)
    }

    pub fn leave(&mut self, player: PlayerId) -> Option<S> {
        self.records.remove(&player)
    }

    pub fn get(&self, player: PlayerId) -> Option<&S> {
        self.records.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut S> {
        self.records.get_mut(&player)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.records.contains_key(&player)
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.records.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &S)> + '_ {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut S)> + '_ {
        self.records.iter_mut().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<S> Default for PlayerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_mut_updates_records_in_place() {
        let mut registry = PlayerRegistry::new();
        registry.join(PlayerId(4), 1u32);
        registry.join(PlayerId(6), 2u32);

        for (_, record) in registry.iter_mut() {
            *record *= 10;
        }

        assert_eq!(registry.get(PlayerId(4)), Some(&10));
        assert_eq!(registry.get(PlayerId(6)), Some(&20));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn iterates_in_player_order() {
        let mut registry = PlayerRegistry::new();
        registry.join(PlayerId(9), ());
        registry.join(PlayerId(2), ());
        registry.join(PlayerId(5), ());

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec![PlayerId(2), PlayerId(5), PlayerId(9)]);
    }

    #[test]
    fn leave_removes_record() {
        let mut registry = PlayerRegistry::new();
        registry.join(PlayerId(1), 3u32);

        assert_eq!(registry.leave(PlayerId(1)), Some(3));
        assert!(!registry.contains(PlayerId(1)));
        assert_eq!(registry.leave(PlayerId(1)), None);
    }
}
