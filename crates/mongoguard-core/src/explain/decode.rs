use bson::Document;
use serde::Deserialize;

use super::CostEstimate;
use crate::error::{GuardError, Result};

/// Narrow projection of an explain response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ExplainProjection {
    #[serde(rename = "executionStats")]
    execution_stats: ExecutionStats,
}

#[derive(Debug, Deserialize)]
struct ExecutionStats {
    #[serde(rename = "totalDocsExamined")]
    total_docs_examined: i64,
}

/// Project the examined-document count out of a raw explain response.
///
/// The response is re-encoded to BSON bytes and re-decoded into the
/// projection. A missing or non-integer `executionStats.totalDocsExamined`
/// is an `Unmarshal` error, never zero.
pub fn decode_cost(raw: &Document) -> Result<CostEstimate> {
    let bytes = bson::to_vec(raw).map_err(|e| GuardError::Marshal(Box::new(e)))?;

    let projection: ExplainProjection =
        bson::from_slice(&bytes).map_err(|e| GuardError::Unmarshal(Box::new(e)))?;

    Ok(CostEstimate {
        documents_examined: projection.execution_stats.total_docs_examined,
    })
}
