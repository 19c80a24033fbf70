// self
use crate::obs::{OpKind, OpOutcome};

/// Increments `placemat_client_op_total{op, outcome}` when the `metrics` feature is on.
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"placemat_client_op_total",
		"op" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn every_op_and_outcome_label_is_recordable() {
		for kind in [OpKind::Login, OpKind::Me] {
			for outcome in [OpOutcome::Attempt, OpOutcome::Success, OpOutcome::Failure] {
				record_op_outcome(kind, outcome);
			}
		}
	}
}
