//! Explain protocol: command construction and response projection.
//!
//! The explain response is large and its shape drifts between server
//! versions. Decoding is two-stage: the driver hands back a generic
//! `Document`, then only `executionStats.totalDocsExamined` is projected into
//! a typed `CostEstimate`. Every other field is ignored.

pub mod command;
pub mod decode;

pub use command::{explain_command, EXPLAIN_FIND};
pub use decode::decode_cost;

use bson::{Bson, Document};

/// Examined-document count reported by the planner for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    pub documents_examined: i64,
}

/// Compact relaxed Extended JSON rendering of a filter (error messages only).
pub fn render_filter(filter: &Document) -> String {
    Bson::Document(filter.clone())
        .into_relaxed_extjson()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn render_filter_is_compact_json() {
        let filter = doc! { "name": "Ada", "age": { "$gt": 30 } };
        assert_eq!(render_filter(&filter), r#"{"name":"Ada","age":{"$gt":30}}"#);
    }
}
