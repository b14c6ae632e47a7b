//! Procedural act map generation.
//!
//! The generator lays random walks over a fixed grid, instantiates one node
//! per distinct column each walk touches in a row, links consecutive steps,
//! and sprinkles extra edges between adjacent columns. Everything is drawn
//! from the injected RNG in a fixed order, so the same seed always yields the
//! same graph.

pub mod node_table;

pub use node_table::{ProgressTier, node_type_for_row};

use crate::config::MapConfig;
use crate::rng::RandomSource;
use crate::state::{GameMap, MapNode, NodeId, NodeType};

/// Generates the map for `act`.
///
/// Draw order: starting columns, walks, node types, cross-links.
pub fn generate_map<R: RandomSource>(act: u32, config: &MapConfig, rng: &mut R) -> GameMap {
    let columns = config.columns.max(1);
    let rows = config.rows.max(1);

    let starts = starting_columns(columns, config.path_count.max(1), rng);
    let paths: Vec<Vec<u32>> = starts
        .iter()
        .map(|&start| walk(start, columns, rows, config.boss_column().min(columns - 1), rng))
        .collect();

    let mut nodes = Vec::new();
    for row in 0..=rows {
        for column in distinct(paths.iter().map(|path| path[row as usize])) {
            let node_type = if row == rows {
                NodeType::Boss
            } else {
                node_type_for_row(row, config, rng)
            };
            nodes.push(MapNode::new(NodeId::new(row, column), node_type));
        }
    }

    for path in &paths {
        for row in 0..rows {
            let from = NodeId::new(row, path[row as usize]);
            let to = NodeId::new(row + 1, path[row as usize + 1]);
            if let Some(node) = nodes.iter_mut().find(|node| node.id == from) {
                node.connect(to);
            }
        }
    }

    add_cross_links(&mut nodes, rows, config.cross_link_chance, rng);

    GameMap {
        act,
        nodes,
        current_node: None,
        boss_node: NodeId::new(rows, config.boss_column().min(columns - 1)),
    }
}

/// Spreads `path_count` starts across the width, jittered by 0 or 1, then
/// tops up with random distinct columns until `MIN_PATHS` are present.
fn starting_columns<R: RandomSource>(columns: u32, path_count: u32, rng: &mut R) -> Vec<u32> {
    let spacing = columns / path_count;
    let mut starts = Vec::new();

    for i in 0..path_count {
        let column = (i * spacing + rng.range(0, 1)).min(columns - 1);
        if !starts.contains(&column) {
            starts.push(column);
        }
    }

    let wanted = MapConfig::MIN_PATHS.min(columns as usize);
    while starts.len() < wanted {
        let column = rng.range(0, columns - 1);
        if !starts.contains(&column) {
            starts.push(column);
        }
    }

    starts
}

/// Column per row for one path: rows `0..rows` walk randomly, the final entry
/// is the boss column.
fn walk<R: RandomSource>(start: u32, columns: u32, rows: u32, boss_column: u32, rng: &mut R) -> Vec<u32> {
    let mut path = Vec::with_capacity(rows as usize + 1);
    path.push(start);

    let mut current = start;
    for _ in 1..rows {
        let mut options = Vec::with_capacity(3);
        if current > 0 {
            options.push(current - 1);
        }
        options.push(current);
        if current + 1 < columns {
            options.push(current + 1);
        }

        current = rng.choose(&options).copied().unwrap_or(current);
        path.push(current);
    }

    path.push(boss_column);
    path
}

/// Adds each missing edge between adjacent columns of consecutive rows with
/// probability `chance`, scanning rows top-down and nodes in creation order.
fn add_cross_links<R: RandomSource>(nodes: &mut [MapNode], rows: u32, chance: f64, rng: &mut R) {
    for row in 0..rows {
        let next_row: Vec<NodeId> = nodes
            .iter()
            .filter(|node| node.row() == row + 1)
            .map(|node| node.id)
            .collect();

        for node in nodes.iter_mut().filter(|node| node.row() == row) {
            for &next in &next_row {
                if node.column().abs_diff(next.column) <= 1
                    && !node.is_connected_to(next)
                    && rng.chance(chance)
                {
                    node.connect(next);
                }
            }
        }
    }
}

/// Distinct values in first-seen order.
fn distinct(values: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    fn map_for(seed: &str) -> GameMap {
        generate_map(1, &MapConfig::default(), &mut SeededRng::from_seed(seed))
    }

    #[test]
    fn same_seed_same_map() {
        assert_eq!(map_for("determinism"), map_for("determinism"));
        assert_ne!(map_for("determinism"), map_for("other"));
    }

    #[test]
    fn single_boss_in_final_row() {
        let map = map_for("boss");
        let bosses: Vec<_> = map
            .nodes
            .iter()
            .filter(|node| node.node_type == NodeType::Boss)
            .collect();

        assert_eq!(bosses.len(), 1);
        assert_eq!(bosses[0].id, map.boss_node);
        assert_eq!(map.boss_node, NodeId::new(15, 3));
        assert_eq!(map.nodes_in_row(15).count(), 1);
    }

    #[test]
    fn fixed_rows_have_fixed_types() {
        let map = map_for("rows");

        assert!(map.nodes_in_row(0).all(|n| n.node_type == NodeType::Combat));
        assert!(map.nodes_in_row(14).all(|n| n.node_type == NodeType::Rest));
        assert!(map.nodes_in_row(0).count() >= MapConfig::MIN_PATHS);
    }

    #[test]
    fn only_first_row_starts_available() {
        let map = map_for("availability");

        for node in &map.nodes {
            assert_eq!(node.available, node.row() == 0, "{}", node.id);
            assert!(!node.visited);
        }
    }

    #[test]
    fn edges_go_to_the_next_row_without_duplicates() {
        let map = map_for("edges");

        for node in &map.nodes {
            for (i, target) in node.connections.iter().enumerate() {
                assert_eq!(target.row, node.row() + 1);
                assert!(map.node(*target).is_some(), "dangling edge to {target}");
                assert!(!node.connections[i + 1..].contains(target));
            }
            if node.row() < 15 {
                assert!(!node.connections.is_empty(), "{} is a dead end", node.id);
            }
        }
    }

    #[test]
    fn narrow_grid_does_not_loop_forever() {
        let config = MapConfig {
            columns: 2,
            path_count: 1,
            ..MapConfig::default()
        };
        let map = generate_map(1, &config, &mut SeededRng::from_seed("narrow"));

        assert_eq!(map.nodes_in_row(0).count(), 2);
        assert_eq!(map.boss_node, NodeId::new(15, 1));
    }
}
