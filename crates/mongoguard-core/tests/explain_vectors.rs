//! Explain-response decoding against recorded server output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use mongoguard_core::explain::decode_cost;
use vector_loader::load;

fn check(name: &str) {
    let v = load(name);
    let result = decode_cost(&v.response_doc());

    match (&v.expect, &v.expect_error) {
        (Some(want), None) => {
            let got = result.unwrap_or_else(|e| panic!("{}: {e}", v.description));
            assert_eq!(got.documents_examined, want.documents_examined, "{}", v.description);
        }
        (None, Some(want)) => {
            let err = result.expect_err(&v.description);
            assert_eq!(err.code().as_str(), want.code, "{}", v.description);
        }
        _ => panic!("{name}: vector must set exactly one of expect/expect_error"),
    }
}

#[test]
fn collscan_with_unknown_fields() {
    check("explain_collscan.json");
}

#[test]
fn ixscan_single_document() {
    check("explain_ixscan.json");
}

#[test]
fn int64_count() {
    check("explain_int64.json");
}

#[test]
fn missing_execution_stats() {
    check("explain_missing_stats.json");
}

#[test]
fn fractional_count_rejected() {
    check("explain_double_count.json");
}
