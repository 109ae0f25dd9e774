use serde::{Deserialize, Serialize};
use tracing::debug;

use super::primitive::Primitive;

/// Group an overlay element belongs to; groups are cleared as a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayGroup {
    Measurement,
    Annotation,
}

impl OverlayGroup {
    const ALL: [OverlayGroup; 2] = [OverlayGroup::Measurement, OverlayGroup::Annotation];

    fn index(self) -> usize {
        match self {
            OverlayGroup::Measurement => 0,
            OverlayGroup::Annotation => 1,
        }
    }
}

/// Opaque handle to an element in the [`OverlayRegistry`].
///
/// Handles carry a generation so a stale handle never aliases a reused slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle {
    slot: u32,
    generation: u32,
}

struct Entry {
    generation: u32,
    group: OverlayGroup,
    primitive: Option<Primitive>,
}

/// Arena of overlay primitives, indexed per group so that clearing a group
/// only visits that group's members.
#[derive(Default)]
pub struct OverlayRegistry {
    entries: Vec<Entry>,
    free: Vec<u32>,
    members: [Vec<OverlayHandle>; 2],
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: OverlayGroup, primitive: Primitive) -> OverlayHandle {
        let handle = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.generation = entry.generation.wrapping_add(1);
                entry.group = group;
                entry.primitive = Some(primitive);
                OverlayHandle {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    group,
                    primitive: Some(primitive),
                });
                OverlayHandle {
                    slot,
                    generation: 0,
                }
            }
        };
        self.members[group.index()].push(handle);
        handle
    }

    fn entry(&self, handle: OverlayHandle) -> Option<&Entry> {
        self.entries
            .get(handle.slot as usize)
            .filter(|e| e.generation == handle.generation && e.primitive.is_some())
    }

    pub fn contains(&self, handle: OverlayHandle) -> bool {
        self.entry(handle).is_some()
    }

    pub fn get(&self, handle: OverlayHandle) -> Option<&Primitive> {
        self.entry(handle).and_then(|e| e.primitive.as_ref())
    }

    pub fn get_mut(&mut self, handle: OverlayHandle) -> Option<&mut Primitive> {
        self.entries
            .get_mut(handle.slot as usize)
            .filter(|e| e.generation == handle.generation)
            .and_then(|e| e.primitive.as_mut())
    }

    pub fn group_of(&self, handle: OverlayHandle) -> Option<OverlayGroup> {
        self.entry(handle).map(|e| e.group)
    }

    /// Remove a single element. Used for replacing previews and discarding
    /// pending markers; completed work is only removed through [`Self::clear_group`].
    pub fn remove(&mut self, handle: OverlayHandle) -> Option<Primitive> {
        let entry = self.entries.get_mut(handle.slot as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        let primitive = entry.primitive.take()?;
        let group = entry.group;
        self.members[group.index()].retain(|h| *h != handle);
        self.free.push(handle.slot);
        Some(primitive)
    }

    /// Remove every element of `group`, returning how many were removed.
    pub fn clear_group(&mut self, group: OverlayGroup) -> usize {
        let handles = std::mem::take(&mut self.members[group.index()]);
        let count = handles.len();
        for handle in handles {
            let entry = &mut self.entries[handle.slot as usize];
            entry.primitive = None;
            self.free.push(handle.slot);
        }
        debug!(?group, count, "Overlay group cleared");
        count
    }

    pub fn group_len(&self, group: OverlayGroup) -> usize {
        self.members[group.index()].len()
    }

    pub fn len(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of one group in insertion order.
    pub fn iter_group(
        &self,
        group: OverlayGroup,
    ) -> impl Iterator<Item = (OverlayHandle, &Primitive)> + '_ {
        self.members[group.index()]
            .iter()
            .filter_map(move |h| self.get(*h).map(|p| (*h, p)))
    }

    /// All elements, measurement group first, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (OverlayGroup, &Primitive)> + '_ {
        OverlayGroup::ALL
            .into_iter()
            .flat_map(move |g| self.iter_group(g).map(move |(_, p)| (g, p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn marker() -> Primitive {
        Primitive::measurement_marker(Point::ZERO, 6.0)
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut reg = OverlayRegistry::new();
        let a = reg.insert(OverlayGroup::Measurement, marker());
        reg.remove(a);
        let b = reg.insert(OverlayGroup::Annotation, marker());
        assert!(!reg.contains(a));
        assert!(reg.contains(b));
        assert!(reg.remove(a).is_none());
        assert_eq!(reg.group_len(OverlayGroup::Annotation), 1);
    }

    #[test]
    fn clear_group_leaves_other_group() {
        let mut reg = OverlayRegistry::new();
        reg.insert(OverlayGroup::Measurement, marker());
        reg.insert(OverlayGroup::Measurement, marker());
        let keep = reg.insert(OverlayGroup::Annotation, marker());
        assert_eq!(reg.clear_group(OverlayGroup::Measurement), 2);
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(keep));
    }
}
