//! Dependency graph between stack units.
//!
//! An edge `a -> b` means `a` depends on `b`: `b` must be provisioned before
//! `a` may start. The graph stays acyclic; an edge that would close a cycle
//! is rejected when it is added.

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::errors::{LaunchError, LaunchResult};
use crate::unit::UnitKind;

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;

#[derive(Debug, Clone, Default)]
pub struct StackGraph {
    graph: DiGraph<UnitKind, ()>,
    node_map: HashMap<UnitKind, NodeIndex>,
}

impl StackGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a unit.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::DuplicateUnit` if the unit is already declared.
    pub fn add_unit(&mut self, unit: UnitKind) -> LaunchResult<()> {
        if self.node_map.contains_key(&unit) {
            return Err(LaunchError::DuplicateUnit { unit });
        }
        let index = self.graph.add_node(unit);
        self.node_map.insert(unit, index);
        Ok(())
    }

    /// Records that `dependent` depends on `prerequisite`.
    ///
    /// Adding an existing edge again is a no-op.
    ///
    /// # Errors
    ///
    /// - `LaunchError::UnknownUnit` if either unit is not declared
    /// - `LaunchError::SelfDependency` if both are the same unit
    /// - `LaunchError::DependencyCycle` if the edge would close a cycle
    pub fn add_dependency(
        &mut self,
        dependent: UnitKind,
        prerequisite: UnitKind,
    ) -> LaunchResult<()> {
        let from = self.index(dependent)?;
        let to = self.index(prerequisite)?;

        if from == to {
            return Err(LaunchError::SelfDependency { unit: dependent });
        }
        if self.graph.contains_edge(from, to) {
            return Ok(());
        }
        if has_path_connecting(&self.graph, to, from, None) {
            return Err(LaunchError::DependencyCycle {
                dependent,
                prerequisite,
            });
        }

        self.graph.add_edge(from, to, ());
        Ok(())
    }

    fn index(&self, unit: UnitKind) -> LaunchResult<NodeIndex> {
        self.node_map
            .get(&unit)
            .copied()
            .ok_or(LaunchError::UnknownUnit { unit })
    }

    pub fn contains(&self, unit: UnitKind) -> bool {
        self.node_map.contains_key(&unit)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn unit_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Units in declaration order.
    pub fn units(&self) -> Vec<UnitKind> {
        self.graph.node_indices().map(|i| self.graph[i]).collect()
    }

    /// All `(dependent, prerequisite)` pairs, sorted.
    pub fn edges(&self) -> Vec<(UnitKind, UnitKind)> {
        let mut edges: Vec<(UnitKind, UnitKind)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(from, to)| (self.graph[from], self.graph[to]))
            .collect();
        edges.sort();
        edges
    }

    pub fn has_dependency(&self, dependent: UnitKind, prerequisite: UnitKind) -> bool {
        match (self.node_map.get(&dependent), self.node_map.get(&prerequisite)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Units `unit` depends on directly.
    pub fn direct_dependencies(&self, unit: UnitKind) -> Vec<UnitKind> {
        self.neighbors(unit, Direction::Outgoing)
    }

    /// Units that depend directly on `unit`.
    pub fn direct_dependents(&self, unit: UnitKind) -> Vec<UnitKind> {
        self.neighbors(unit, Direction::Incoming)
    }

    fn neighbors(&self, unit: UnitKind, direction: Direction) -> Vec<UnitKind> {
        let Some(&index) = self.node_map.get(&unit) else {
            return Vec::new();
        };
        let mut units: Vec<UnitKind> = self
            .graph
            .neighbors_directed(index, direction)
            .map(|i| self.graph[i])
            .collect();
        units.sort();
        units.dedup();
        units
    }

    /// Every unit that cannot start while `unit` is not provisioned,
    /// directly or transitively.
    pub fn blocked_by(&self, unit: UnitKind) -> BTreeSet<UnitKind> {
        let mut blocked = BTreeSet::new();
        let Some(&start) = self.node_map.get(&unit) else {
            return blocked;
        };

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for dependent in self.graph.neighbors_directed(current, Direction::Incoming) {
                if blocked.insert(self.graph[dependent]) {
                    queue.push_back(dependent);
                }
            }
        }
        blocked
    }

    /// Provisioning order: every unit comes after all of its dependencies.
    pub fn topological_order(&self) -> LaunchResult<Vec<UnitKind>> {
        let indices = toposort(&self.graph, None).map_err(|cycle| {
            let unit = self.graph[cycle.node_id()];
            LaunchError::DependencyCycle {
                dependent: unit,
                prerequisite: unit,
            }
        })?;

        // Edges point at prerequisites, so the sort lists dependents first.
        Ok(indices.into_iter().rev().map(|i| self.graph[i]).collect())
    }

    /// Groups units into waves that may be provisioned in parallel.
    ///
    /// A unit's wave is one past the deepest wave among its dependencies, so
    /// no two units in the same wave are connected by a path.
    pub fn waves(&self) -> LaunchResult<Vec<Vec<UnitKind>>> {
        let mut depth: BTreeMap<UnitKind, usize> = BTreeMap::new();
        for unit in self.topological_order()? {
            let level = self
                .direct_dependencies(unit)
                .iter()
                .filter_map(|dep| depth.get(dep))
                .map(|d| d + 1)
                .max()
                .unwrap_or(0);
            depth.insert(unit, level);
        }

        let wave_count = depth.values().max().map(|d| d + 1).unwrap_or(0);
        let mut waves = vec![Vec::new(); wave_count];
        for (unit, level) in depth {
            waves[level].push(unit);
        }
        Ok(waves)
    }
}
