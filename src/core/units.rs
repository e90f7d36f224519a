//! Unit hierarchy built from the flat `GET /api/units` list

use std::collections::{HashMap, HashSet};

use super::models::{Unit, UnitId};

/// Forest of units linked by `parent_id`.
///
/// Units whose parent is unknown become roots. A parent chain that loops is
/// cut at the lowest id in the loop, which then becomes a root.
#[derive(Debug, Clone, Default)]
pub struct UnitTree {
    units: HashMap<UnitId, Unit>,
    children: HashMap<UnitId, Vec<UnitId>>,
    roots: Vec<UnitId>,
}

/// One line of the rendered tree
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRow<'a> {
    pub depth: usize,
    pub unit: &'a Unit,
    pub child_count: usize,
}

impl UnitTree {
    pub fn build(units: Vec<Unit>) -> Self {
        let units: HashMap<UnitId, Unit> = units.into_iter().map(|u| (u.id, u)).collect();

        let by_name = |ids: &mut Vec<UnitId>| {
            ids.sort_by(|a, b| {
                units[a]
                    .name
                    .to_lowercase()
                    .cmp(&units[b].name.to_lowercase())
                    .then(a.cmp(b))
            })
        };

        let mut roots = Vec::new();
        let mut children: HashMap<UnitId, Vec<UnitId>> = HashMap::new();
        for unit in units.values() {
            match unit.parent_id {
                Some(parent) if parent != unit.id && units.contains_key(&parent) => {
                    children.entry(parent).or_default().push(unit.id)
                }
                _ => roots.push(unit.id),
            }
        }

        // Walk from the roots; anything unreached sits on a parent loop
        let mut reached = HashSet::new();
        let mut stack = roots.clone();
        while let Some(id) = stack.pop() {
            if reached.insert(id) {
                stack.extend(children.get(&id).into_iter().flatten().copied());
            }
        }

        let mut unreached: Vec<UnitId> = units
            .keys()
            .filter(|id| !reached.contains(id))
            .copied()
            .collect();
        unreached.sort();
        for id in unreached {
            if reached.contains(&id) {
                continue;
            }
            if let Some(parent) = units[&id].parent_id {
                if let Some(siblings) = children.get_mut(&parent) {
                    siblings.retain(|c| *c != id);
                }
            }
            roots.push(id);
            let mut stack = vec![id];
            while let Some(next) = stack.pop() {
                if reached.insert(next) {
                    stack.extend(children.get(&next).into_iter().flatten().copied());
                }
            }
        }

        by_name(&mut roots);
        for ids in children.values_mut() {
            by_name(ids);
        }

        Self {
            units,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Unit> {
        self.roots.iter().map(|id| &self.units[id])
    }

    pub fn children(&self, id: UnitId) -> impl Iterator<Item = &Unit> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|c| &self.units[c])
    }

    /// Depth-first rows in display order
    pub fn rows(&self) -> Vec<UnitRow<'_>> {
        let mut rows = Vec::with_capacity(self.units.len());
        let mut stack: Vec<(usize, UnitId)> = self.roots.iter().rev().map(|id| (0, *id)).collect();
        while let Some((depth, id)) = stack.pop() {
            let kids = self.children.get(&id).map(Vec::as_slice).unwrap_or(&[]);
            rows.push(UnitRow {
                depth,
                unit: &self.units[&id],
                child_count: kids.len(),
            });
            stack.extend(kids.iter().rev().map(|c| (depth + 1, *c)));
        }
        rows
    }

    /// Chain from the root down to `id`, inclusive
    pub fn path_to(&self, id: UnitId) -> Vec<&Unit> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.units.get(&id);
        while let Some(unit) = current {
            if !seen.insert(unit.id) {
                break;
            }
            path.push(unit);
            if self.roots.contains(&unit.id) {
                break;
            }
            current = unit.parent_id.and_then(|p| self.units.get(&p));
        }
        path.reverse();
        path
    }

    /// Ids of `id` and everything below it
    pub fn subtree_ids(&self, id: UnitId) -> Vec<UnitId> {
        if !self.units.contains_key(&id) {
            return Vec::new();
        }
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            ids.push(next);
            stack.extend(self.children.get(&next).into_iter().flatten().copied());
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::UnitLevel;

    fn unit(id: UnitId, name: &str, parent: Option<UnitId>, level: UnitLevel) -> Unit {
        Unit {
            id,
            name: name.to_string(),
            parent_id: parent,
            unit_level: level,
            referral_code: format!("REF{}", id),
        }
    }

    fn battalion() -> Vec<Unit> {
        vec![
            unit(5, "2nd Platoon", Some(2), UnitLevel::Platoon),
            unit(1, "1-22 IN", None, UnitLevel::Battalion),
            unit(2, "Bravo Company", Some(1), UnitLevel::Company),
            unit(3, "Alpha Company", Some(1), UnitLevel::Company),
            unit(4, "1st Platoon", Some(2), UnitLevel::Platoon),
        ]
    }

    #[test]
    fn test_rows_are_depth_first_by_name() {
        let tree = UnitTree::build(battalion());
        let rows: Vec<(usize, &str)> = tree
            .rows()
            .iter()
            .map(|r| (r.depth, r.unit.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "1-22 IN"),
                (1, "Alpha Company"),
                (1, "Bravo Company"),
                (2, "1st Platoon"),
                (2, "2nd Platoon"),
            ]
        );
        assert_eq!(tree.rows()[0].child_count, 2);
    }

    #[test]
    fn test_orphans_become_roots() {
        let mut units = battalion();
        units.push(unit(9, "Detached Team", Some(404), UnitLevel::Team));
        let tree = UnitTree::build(units);
        let roots: Vec<&str> = tree.roots().map(|u| u.name.as_str()).collect();
        assert_eq!(roots, vec!["1-22 IN", "Detached Team"]);
    }

    #[test]
    fn test_cycle_is_cut_at_lowest_id() {
        let units = vec![
            unit(10, "Loop A", Some(11), UnitLevel::Squad),
            unit(11, "Loop B", Some(10), UnitLevel::Squad),
            unit(12, "Self", Some(12), UnitLevel::Team),
        ];
        let tree = UnitTree::build(units);
        assert_eq!(tree.rows().len(), 3);

        let roots: Vec<UnitId> = tree.roots().map(|u| u.id).collect();
        assert_eq!(roots, vec![10, 12]);
        assert_eq!(tree.children(10).map(|u| u.id).collect::<Vec<_>>(), vec![11]);
        assert_eq!(
            tree.path_to(11).iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![10, 11]
        );
    }

    #[test]
    fn test_path_to_and_subtree() {
        let tree = UnitTree::build(battalion());
        let path: Vec<&str> = tree.path_to(5).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(path, vec!["1-22 IN", "Bravo Company", "2nd Platoon"]);
        assert!(tree.path_to(99).is_empty());

        let mut subtree = tree.subtree_ids(2);
        subtree.sort();
        assert_eq!(subtree, vec![2, 4, 5]);
        assert!(tree.subtree_ids(99).is_empty());
    }

    #[test]
    fn test_empty() {
        let tree = UnitTree::build(vec![]);
        assert!(tree.is_empty());
        assert!(tree.rows().is_empty());
    }
}
