//! Per-vehicle export and the poll-and-step sequence.
//!
//! An external poller sees every vehicle in the roster, keyed and ordered by
//! id.  A vehicle that has left the road is reported once with lane `-1`;
//! the export that reports it also prunes it, so no later [`snapshot`] or
//! [`poll`] carries it again.

use std::collections::BTreeMap;

use hw_behavior::BehaviorModel;
use hw_sim::{SimError, SimResult, Simulation, SpawnSource};
use serde::{Deserialize, Serialize};

use crate::{OutputResult, VehicleRecord};

/// Every roster entry at one instant, keyed by vehicle id.
///
/// Serializes as a JSON object `{"<id>": {"id", "speed", "lane"}, …}` with
/// keys in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleExport(pub BTreeMap<u32, VehicleRecord>);

impl VehicleExport {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&VehicleRecord> {
        self.0.get(&id)
    }

    /// Records in ascending id order.
    pub fn records(&self) -> impl Iterator<Item = &VehicleRecord> + '_ {
        self.0.values()
    }

    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Export the roster, then drop the departed vehicles it just reported.
///
/// Does not advance the clock.  Pruning happens even on a halted simulation,
/// so a vehicle shown with lane `-1` is never shown twice.
pub fn snapshot<S: SpawnSource, B: BehaviorModel>(sim: &mut Simulation<S, B>) -> VehicleExport {
    let export = VehicleExport(
        sim.scheduler()
            .iter()
            .map(|v| (v.id.0, VehicleRecord::from(v)))
            .collect(),
    );
    let pruned = sim.prune_departed();
    if pruned > 0 {
        tracing::trace!(pruned, "departed vehicles dropped after export");
    }
    export
}

/// Export the roster, drop departed vehicles, then advance one tick.
///
/// The returned export is the state *before* the tick.  Each call mutates the
/// simulation, so concurrent pollers must serialize on one lock around the
/// whole call.  A halted simulation is left untouched.
pub fn poll<S: SpawnSource, B: BehaviorModel>(
    sim: &mut Simulation<S, B>,
) -> SimResult<VehicleExport> {
    if sim.is_halted() {
        return Err(SimError::Halted);
    }
    let export = snapshot(sim);
    sim.step()?;
    Ok(export)
}
