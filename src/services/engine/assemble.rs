//! Path assembler and top-K selector

use crate::error::{PlannerError, PlannerResult};
use crate::services::cost::CostModel;
use crate::services::network::Network;
use crate::types::{CandidateSolution, HopRecord, Metric};

/// Origin-step result for one first-stage entry
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EntryCandidate {
    pub entry: String,
    pub path: Vec<String>,
    pub total: f64,
}

/// Sort ascending by total and keep the first `top_k`.
///
/// Equal totals keep their first-stage enumeration order. Candidates are one
/// per distinct first-stage entry, not the k best paths overall.
pub(crate) fn select_top_k(mut candidates: Vec<EntryCandidate>, top_k: usize) -> Vec<EntryCandidate> {
    candidates.sort_by(|a, b| a.total.total_cmp(&b.total));
    candidates.truncate(top_k);
    candidates
}

/// Price every hop of the selected paths on both channels
pub(crate) fn assemble<M: CostModel + ?Sized>(
    network: &Network,
    model: &M,
    metric: Metric,
    selected: Vec<EntryCandidate>,
) -> PlannerResult<Vec<CandidateSolution>> {
    selected
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| -> PlannerResult<CandidateSolution> {
            let hops = price_hops(network, model, &candidate.path)?;
            let total_cost: f64 = hops.iter().map(|h| h.price.cost).sum();
            let total_duration_hours: f64 = hops.iter().map(|h| h.price.duration_hours).sum();

            Ok(CandidateSolution {
                rank: (i + 1) as u32,
                metric,
                entry: candidate.entry,
                path: candidate.path,
                total: candidate.total,
                hops,
                total_cost,
                total_duration_hours,
            })
        })
        .collect()
}

fn price_hops<M: CostModel + ?Sized>(
    network: &Network,
    model: &M,
    path: &[String],
) -> PlannerResult<Vec<HopRecord>> {
    path.windows(2)
        .map(|pair| -> PlannerResult<HopRecord> {
            let from = network.node(&pair[0])?;
            let to = network.node(&pair[1])?;
            let price = model.hop(from, to).ok_or_else(|| PlannerError::NoRoute {
                from: from.id.clone(),
                to: to.id.clone(),
            })?;
            Ok(HopRecord {
                from: from.id.clone(),
                to: to.id.clone(),
                price,
            })
        })
        .collect()
}
