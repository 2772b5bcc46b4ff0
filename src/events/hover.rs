//! Hover set and the per-tick enter/leave transition.

use bevy::prelude::*;

/// Annotations under the pointer as of the last evaluated tick.
///
/// Unique by entity and kept in insertion order, which is the order leave
/// events are reported in. Sets are tiny (a handful of overlapping
/// annotations), so a vector beats hashing here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverSet {
    hovered: Vec<Entity>,
}

/// Membership changes produced by one tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverTransition {
    /// Newly hovered, in pick order
    pub entered: Vec<Entity>,
    /// No longer hovered, in hover set order
    pub left: Vec<Entity>,
}

impl HoverTransition {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

impl HoverSet {
    pub fn contains(&self, annotation: Entity) -> bool {
        self.hovered.contains(&annotation)
    }

    pub fn len(&self) -> usize {
        self.hovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.hovered.iter().copied()
    }

    /// Replace the membership with `currently_hit` and report what changed.
    ///
    /// `currently_hit` must already be deduplicated. After the call the set
    /// holds exactly those annotations.
    pub fn apply(&mut self, currently_hit: &[Entity]) -> HoverTransition {
        let previously_hovered = std::mem::take(&mut self.hovered);

        let entered: Vec<Entity> = currently_hit
            .iter()
            .copied()
            .filter(|annotation| !previously_hovered.contains(annotation))
            .collect();
        let left = previously_hovered
            .iter()
            .copied()
            .filter(|annotation| !currently_hit.contains(annotation))
            .collect();

        // Survivors keep their original position, newcomers append
        self.hovered = previously_hovered
            .into_iter()
            .filter(|annotation| currently_hit.contains(annotation))
            .collect();
        self.hovered.extend(entered.iter().copied());

        HoverTransition { entered, left }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(world: &mut World, count: usize) -> Vec<Entity> {
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_first_tick_enters_everything() {
        let mut world = World::new();
        let e = entities(&mut world, 2);
        let mut set = HoverSet::default();

        let transition = set.apply(&[e[0], e[1]]);
        assert_eq!(transition.entered, vec![e[0], e[1]]);
        assert!(transition.left.is_empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_repeated_hit_is_silent() {
        let mut world = World::new();
        let e = entities(&mut world, 1);
        let mut set = HoverSet::default();

        set.apply(&[e[0]]);
        let transition = set.apply(&[e[0]]);
        assert!(transition.is_empty());
        assert!(set.contains(e[0]));
    }

    #[test]
    fn test_partial_leave() {
        let mut world = World::new();
        let e = entities(&mut world, 2);
        let mut set = HoverSet::default();

        set.apply(&[e[0], e[1]]);
        let transition = set.apply(&[e[1]]);
        assert!(transition.entered.is_empty());
        assert_eq!(transition.left, vec![e[0]]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![e[1]]);
    }

    #[test]
    fn test_leave_order_follows_insertion_order() {
        let mut world = World::new();
        let e = entities(&mut world, 3);
        let mut set = HoverSet::default();

        set.apply(&[e[2]]);
        set.apply(&[e[2], e[0], e[1]]);
        let transition = set.apply(&[]);
        assert_eq!(transition.left, vec![e[2], e[0], e[1]]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_swap_enters_and_leaves() {
        let mut world = World::new();
        let e = entities(&mut world, 2);
        let mut set = HoverSet::default();

        set.apply(&[e[0]]);
        let transition = set.apply(&[e[1]]);
        assert_eq!(transition.entered, vec![e[1]]);
        assert_eq!(transition.left, vec![e[0]]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![e[1]]);
    }
}
