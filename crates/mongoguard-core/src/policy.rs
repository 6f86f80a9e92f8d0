//! Threshold policy over a cost estimate.

use bson::Document;

use crate::error::GuardError;
use crate::explain::{render_filter, CostEstimate};

/// Decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Pass,
    Reject { examined: i64, threshold: i64 },
}

impl PolicyDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyDecision::Pass => "pass",
            PolicyDecision::Reject { .. } => "reject",
        }
    }
}

/// The threshold is an inclusive upper bound: `examined == threshold` passes.
pub fn evaluate(estimate: CostEstimate, threshold: i64) -> PolicyDecision {
    if estimate.documents_examined > threshold {
        return PolicyDecision::Reject {
            examined: estimate.documents_examined,
            threshold,
        };
    }
    PolicyDecision::Pass
}

/// Evaluate and turn a rejection into a descriptive error.
pub fn enforce(
    estimate: CostEstimate,
    threshold: i64,
    operation: &str,
    filter: &Document,
) -> Result<(), GuardError> {
    match evaluate(estimate, threshold) {
        PolicyDecision::Pass => Ok(()),
        PolicyDecision::Reject { examined, threshold } => Err(GuardError::ThresholdExceeded {
            operation: operation.to_string(),
            filter: render_filter(filter),
            examined,
            threshold,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use bson::doc;

    fn est(n: i64) -> CostEstimate {
        CostEstimate { documents_examined: n }
    }

    #[test]
    fn boundary_is_inclusive() {
        assert_eq!(evaluate(est(99), 100), PolicyDecision::Pass);
        assert_eq!(evaluate(est(100), 100), PolicyDecision::Pass);
        assert_eq!(
            evaluate(est(101), 100),
            PolicyDecision::Reject { examined: 101, threshold: 100 }
        );
    }

    #[test]
    fn zero_threshold_rejects_any_examined_doc() {
        assert_eq!(evaluate(est(0), 0), PolicyDecision::Pass);
        assert!(matches!(evaluate(est(1), 0), PolicyDecision::Reject { .. }));
        assert!(matches!(evaluate(est(0), -1), PolicyDecision::Reject { .. }));
    }

    #[test]
    fn enforce_reports_operation_and_filter() {
        let err = enforce(est(10_000), 10, "find", &doc! { "name": "Ada" }).unwrap_err();
        match &err {
            GuardError::ThresholdExceeded { operation, filter, examined, threshold } => {
                assert_eq!(operation, "find");
                assert_eq!(filter, r#"{"name":"Ada"}"#);
                assert_eq!(*examined, 10_000);
                assert_eq!(*threshold, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("total docs examined surpassed threshold"));
    }
}
