//! Farm priority: owners reinforce their own farms before anything else

use super::ledger::Ledger;
use super::snapshot::Snapshot;

/// Give each owned farm one march from its owner while the owner has
/// marches left. Farms never reciprocate, and an owner that is itself a
/// farm is skipped.
///
/// Returns the number of edges created.
pub fn assign_farm_priority(snapshot: &Snapshot, ledger: &mut Ledger) -> usize {
    let mut assigned = 0;

    for (owner, farms) in snapshot.farms_by_owner() {
        if snapshot.is_farm(owner) {
            continue;
        }
        for farm in farms {
            if ledger.remaining(owner) == 0 {
                break;
            }
            if ledger.try_assign(owner, farm) {
                assigned += 1;
            }
        }
    }

    tracing::debug!(assigned, "farm priority phase");
    assigned
}
