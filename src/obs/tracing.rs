// self
use crate::{
	_prelude::*,
	obs::{self, OpKind, OpOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// Lifecycle handle for one triggered console operation.
///
/// [`OpSpan::start`] emits the only info-level event of an operation (the trigger notice);
/// the result is attached to the span as `outcome` and `status` fields by
/// [`OpSpan::finish`] and otherwise only surfaces at `trace` level.
#[derive(Clone, Debug)]
pub struct OpSpan {
	kind: OpKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Opens the span for `kind`, logs that the action was triggered, and counts the attempt.
	pub fn start(kind: OpKind, stage: &'static str) -> Self {
		obs::record_op_outcome(kind, OpOutcome::Attempt);

		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"placemat_client.op",
				op = kind.as_str(),
				stage,
				outcome = tracing::field::Empty,
				status = tracing::field::Empty,
			);

			span.in_scope(|| tracing::info!("{kind} triggered"));

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Operation this span tracks.
	pub fn kind(&self) -> OpKind {
		self.kind
	}

	/// Records the final outcome and HTTP status (when one arrived).
	pub fn finish(&self, outcome: OpOutcome, status: Option<u16>) {
		obs::record_op_outcome(self.kind, outcome);

		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());

			if let Some(status) = status {
				self.span.record("status", status);
			}

			self.span.in_scope(|| tracing::trace!(status, "{} {outcome}", self.kind));
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn span_lifecycle_accepts_missing_status() {
		let span = OpSpan::start(OpKind::Me, "span_lifecycle_accepts_missing_status");

		span.finish(OpOutcome::Failure, None);

		assert_eq!(span.kind(), OpKind::Me);
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OpSpan::start(OpKind::Login, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		span.finish(OpOutcome::Success, Some(200));

		assert_eq!(value, 42);
	}

	#[cfg(not(feature = "tracing"))]
	#[tokio::test]
	async fn instrument_is_passthrough() {
		let span = OpSpan::start(OpKind::Login, "instrument_is_passthrough");

		assert_eq!(span.instrument(async { 42 }).await, 42);
	}
}
