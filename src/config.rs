//! Engine configuration.
//!
//! One serde-loadable struct covering every tunable the engines expose.
//! Missing fields take their defaults, so `{}` is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::ClockConfig;
use crate::layering::{LaneLayerer, LayeringMode};
use crate::occupancy::{OccupancyAggregator, ShareKey};
use crate::report::Baseline;

/// Configuration for layout, occupancy, and clock behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Expanded lanes or one collapsed summary row per group.
    pub layering_mode: LayeringMode,
    /// Per-group overrides of `layering_mode` (group key to mode).
    pub group_modes: BTreeMap<String, LayeringMode>,
    /// Lane bound per group. `None` = unbounded.
    pub max_lanes: Option<usize>,
    /// Start of the occupancy window.
    pub baseline: Baseline,
    /// How occupancy shares are keyed.
    pub share_key: ShareKey,
    /// Clock settings.
    pub clock: ClockConfig,
}

impl EngineConfig {
    /// Layerer configured from this config.
    pub fn layerer(&self) -> LaneLayerer {
        LaneLayerer::new()
            .with_mode(self.layering_mode)
            .with_lane_bound(self.max_lanes)
    }

    /// Layering mode for `group`: its override, else `layering_mode`.
    pub fn mode_for(&self, group: &str) -> LayeringMode {
        self.group_modes
            .get(group)
            .copied()
            .unwrap_or(self.layering_mode)
    }

    /// Layerer for `group`, honoring its override.
    pub fn layerer_for(&self, group: &str) -> LaneLayerer {
        self.layerer().with_mode(self.mode_for(group))
    }

    /// Aggregator configured from this config.
    pub fn aggregator(&self) -> OccupancyAggregator {
        OccupancyAggregator::new().with_key(self.share_key)
    }
}
