//! Progress-tiered node type table.

use crate::config::MapConfig;
use crate::rng::RandomSource;
use crate::state::NodeType;

/// Coarse position of a row within the act.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTier {
    /// `row / rows < 0.3`
    Early,
    /// `row / rows < 0.7`
    Mid,
    Late,
}

impl ProgressTier {
    pub fn for_row(row: u32, rows: u32) -> Self {
        let progress = f64::from(row) / f64::from(rows.max(1));
        if progress < 0.3 {
            Self::Early
        } else if progress < 0.7 {
            Self::Mid
        } else {
            Self::Late
        }
    }

    /// Cumulative breakpoints: the first entry whose bound exceeds the roll
    /// wins, and the fallback covers the rest of `[0, 1)`.
    fn breakpoints(&self) -> (&'static [(f64, NodeType)], NodeType) {
        match self {
            Self::Early => (
                &[
                    (0.6, NodeType::Combat),
                    (0.8, NodeType::Event),
                    (0.9, NodeType::Shop),
                ],
                NodeType::ForgeUpgrade,
            ),
            Self::Mid => (
                &[
                    (0.4, NodeType::Combat),
                    (0.55, NodeType::Event),
                    (0.7, NodeType::EliteCombat),
                    (0.8, NodeType::Shop),
                    (0.9, NodeType::Rest),
                ],
                NodeType::ForgeUpgrade,
            ),
            Self::Late => (
                &[
                    (0.35, NodeType::Combat),
                    (0.55, NodeType::EliteCombat),
                    (0.7, NodeType::Rest),
                    (0.85, NodeType::Shop),
                ],
                NodeType::Event,
            ),
        }
    }

    pub fn pick(&self, roll: f64) -> NodeType {
        let (table, fallback) = self.breakpoints();
        table
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map_or(fallback, |(_, node_type)| *node_type)
    }
}

/// Chooses the type of a non-boss node in `row`.
///
/// Row 0 is always combat and the row right before the boss is always a rest
/// site; neither consumes a draw. The row two floors before the boss rolls
/// for a forced elite before falling back to the tier table.
pub fn node_type_for_row<R: RandomSource>(row: u32, config: &MapConfig, rng: &mut R) -> NodeType {
    let rows = config.rows;
    if row == 0 {
        return NodeType::Combat;
    }
    if row + 1 == rows {
        return NodeType::Rest;
    }
    if row + 2 == rows && rng.chance(config.pre_boss_elite_chance) {
        return NodeType::EliteCombat;
    }

    ProgressTier::for_row(row, rows).pick(rng.next_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    #[test]
    fn tiers_follow_progress() {
        assert_eq!(ProgressTier::for_row(4, 15), ProgressTier::Early);
        assert_eq!(ProgressTier::for_row(5, 15), ProgressTier::Mid);
        assert_eq!(ProgressTier::for_row(10, 15), ProgressTier::Mid);
        assert_eq!(ProgressTier::for_row(11, 15), ProgressTier::Late);
    }

    #[test]
    fn breakpoints_are_exclusive_upper_bounds() {
        assert_eq!(ProgressTier::Early.pick(0.0), NodeType::Combat);
        assert_eq!(ProgressTier::Early.pick(0.6), NodeType::Event);
        assert_eq!(ProgressTier::Early.pick(0.95), NodeType::ForgeUpgrade);
        assert_eq!(ProgressTier::Mid.pick(0.65), NodeType::EliteCombat);
        assert_eq!(ProgressTier::Mid.pick(0.85), NodeType::Rest);
        assert_eq!(ProgressTier::Late.pick(0.5), NodeType::EliteCombat);
        assert_eq!(ProgressTier::Late.pick(0.99), NodeType::Event);
    }

    #[test]
    fn fixed_rows_do_not_draw() {
        let config = MapConfig::default();
        let mut rng = SeededRng::from_seed("fixed");
        let reference = rng.clone();

        assert_eq!(node_type_for_row(0, &config, &mut rng), NodeType::Combat);
        assert_eq!(node_type_for_row(14, &config, &mut rng), NodeType::Rest);
        assert_eq!(rng, reference);
    }

    #[test]
    fn pre_boss_row_is_elite_when_forced() {
        let config = MapConfig {
            pre_boss_elite_chance: 1.0,
            ..MapConfig::default()
        };
        let mut rng = SeededRng::from_seed("elite");

        assert_eq!(node_type_for_row(13, &config, &mut rng), NodeType::EliteCombat);
    }
}
