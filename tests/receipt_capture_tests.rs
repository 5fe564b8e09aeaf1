mod common;

use common::{date, setup_manager};
use steward_core::{
    ledger::{DraftField, PartialTransaction, ReceiptExtractor, TransactionKind, UNCATEGORIZED},
    LedgerError,
};

/// Extractor answering with a canned JSON payload.
struct CannedExtractor(&'static str);

impl ReceiptExtractor for CannedExtractor {
    fn extract(
        &self,
        _image: &str,
        candidate_categories: &[String],
    ) -> Result<PartialTransaction, LedgerError> {
        assert!(!candidate_categories.is_empty());
        PartialTransaction::from_json(self.0)
    }
}

#[test]
fn defaulted_draft_can_be_saved_and_taxed() {
    let (mut manager, _base) = setup_manager();
    let extractor = CannedExtractor(r#"{"source":"Office Depot","amount":"$64.20","date":"n/a"}"#);

    let extracted = manager
        .capture_receipt(&extractor, "data:image/jpeg;base64,/9j/4AAQ")
        .unwrap();
    assert!(extracted.was_defaulted(DraftField::Date));
    assert!(extracted.was_defaulted(DraftField::Kind));
    assert!(extracted.was_defaulted(DraftField::Category));
    assert_eq!(extracted.draft.date, date(2024, 5, 1));
    assert_eq!(extracted.draft.kind, TransactionKind::Expense);
    assert_eq!(extracted.draft.category, UNCATEGORIZED);

    let id = manager.add_transaction(extracted.draft).unwrap();
    let stored = manager.transaction(id).unwrap();
    assert_eq!(stored.amount, 64.2);
    assert!(stored.attachment.is_some());
    assert_eq!(manager.estimate().totals.expenses, 64.2);
    assert_eq!(manager.estimate().total(), 0.0);
}

#[test]
fn malformed_service_answer_is_an_extraction_error() {
    let (manager, _base) = setup_manager();
    let extractor = CannedExtractor("not json at all");
    let err = manager.capture_receipt(&extractor, "img").unwrap_err();
    assert!(matches!(err, LedgerError::Extraction(_)));
}

#[test]
fn income_receipt_matches_candidate_category() {
    let (manager, _base) = setup_manager();
    let extractor = CannedExtractor(
        r#"{"source":"Globex","amount":2500,"type":"income","category":"consulting gig","date":"2024-04-30"}"#,
    );
    let extracted = manager.capture_receipt(&extractor, "img").unwrap();
    assert!(extracted.defaulted.is_empty());
    assert_eq!(extracted.draft.category, "Consulting Gig");
    assert_eq!(extracted.draft.date, date(2024, 4, 30));
}
