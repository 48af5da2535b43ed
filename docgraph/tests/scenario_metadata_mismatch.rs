//! Scenario F: `DocumentMetadata.Pages` disagrees with the number of
//! materialized PAGE blocks. Parsing is strict about this and fails with
//! a typed error rather than silently truncating or padding pages.

mod common;

use common::*;
use docgraph::DocgraphError;

#[test]
fn declared_page_count_mismatch_is_rejected() {
    let doc = document(2, vec![page("page1", &[])]);

    let err = docgraph::parse(raw_document(doc)).unwrap_err();
    assert!(matches!(err, DocgraphError::MetadataMismatch { declared: 2, materialized: 1 }));
}

#[test]
fn matching_page_count_parses() {
    let doc = document(1, vec![page("page1", &[])]);
    assert!(docgraph::parse(raw_document(doc)).is_ok());
}
