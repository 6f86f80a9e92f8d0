use bson::{doc, Document};

/// Operation name for guarded finds.
pub const EXPLAIN_FIND: &str = "find";

/// Build `{ explain: { <operation>: <collection>, filter: <filter> } }`.
///
/// Key order matters: the server takes the command name from the first key
/// of the inner document.
pub fn explain_command(operation: &str, collection: &str, filter: &Document) -> Document {
    let mut inner = Document::new();
    inner.insert(operation, collection);
    inner.insert("filter", filter.clone());
    doc! { "explain": inner }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn find_command_shape() {
        let cmd = explain_command(EXPLAIN_FIND, "users", &doc! { "name": "Ada" });
        assert_eq!(
            cmd,
            doc! { "explain": { "find": "users", "filter": { "name": "Ada" } } }
        );

        let inner = cmd.get_document("explain").unwrap();
        let keys: Vec<&String> = inner.keys().collect();
        assert_eq!(keys, ["find", "filter"]);
    }

    #[test]
    fn empty_filter_is_kept() {
        let cmd = explain_command(EXPLAIN_FIND, "users", &Document::new());
        let inner = cmd.get_document("explain").unwrap();
        assert_eq!(inner.get_document("filter").unwrap(), &Document::new());
    }
}
