//! Boundary with the receipt/document extraction service.
//!
//! The service is best effort: any field of its answer may be missing or
//! unusable. Defaults are applied here, once, so everything downstream only
//! ever sees complete [`TransactionDraft`]s.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::{
    category::UNCATEGORIZED,
    ledger::Ledger,
    transaction::{TransactionDraft, TransactionKind},
};
use crate::{core::time::Clock, errors::LedgerError};

/// Source label used when the extractor could not read a vendor.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Raw answer of an extraction service. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialTransaction {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// External service that reads a receipt image into a partial transaction.
pub trait ReceiptExtractor {
    fn extract(
        &self,
        image: &str,
        candidate_categories: &[String],
    ) -> Result<PartialTransaction, LedgerError>;
}

/// Fields of a draft that may have been filled in with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Date,
    Source,
    Amount,
    Kind,
    Category,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::Date => "date",
            DraftField::Source => "source",
            DraftField::Amount => "amount",
            DraftField::Kind => "type",
            DraftField::Category => "category",
        };
        f.write_str(label)
    }
}

/// A complete draft plus the list of fields that were defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDraft {
    pub draft: TransactionDraft,
    pub defaulted: Vec<DraftField>,
}

impl ExtractedDraft {
    pub fn was_defaulted(&self, field: DraftField) -> bool {
        self.defaulted.contains(&field)
    }
}

impl PartialTransaction {
    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(raw).map_err(|err| LedgerError::Extraction(err.to_string()))
    }

    /// Applies the defaulting rules and returns a complete draft.
    pub fn into_draft(self, clock: &dyn Clock, candidates: &[String]) -> ExtractedDraft {
        let mut defaulted = Vec::new();

        let date = match self.date.as_deref().and_then(parse_date) {
            Some(date) => date,
            None => {
                defaulted.push(DraftField::Date);
                clock.today()
            }
        };

        let source = match self.source.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                defaulted.push(DraftField::Source);
                UNKNOWN_SOURCE.to_string()
            }
        };

        let amount = match self.amount {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                defaulted.push(DraftField::Amount);
                0.0
            }
        };

        let kind = match self.kind.as_deref().and_then(TransactionKind::parse) {
            Some(kind) => kind,
            None => {
                defaulted.push(DraftField::Kind);
                TransactionKind::Expense
            }
        };

        let category = match self
            .category
            .as_deref()
            .and_then(|name| canonical_candidate(name, candidates))
        {
            Some(name) => name,
            None => {
                defaulted.push(DraftField::Category);
                UNCATEGORIZED.to_string()
            }
        };

        ExtractedDraft {
            draft: TransactionDraft::new(date, source, amount, kind, category),
            defaulted,
        }
    }
}

/// Runs `extractor` over `image` and assembles a draft ready for review.
///
/// The image is kept as the draft's attachment.
pub fn capture_receipt(
    extractor: &dyn ReceiptExtractor,
    image: impl Into<String>,
    ledger: &Ledger,
    clock: &dyn Clock,
) -> Result<ExtractedDraft, LedgerError> {
    let image = image.into();
    let candidates = ledger.category_names(None);
    let partial = extractor.extract(&image, &candidates)?;
    let mut extracted = partial.into_draft(clock, &candidates);
    extracted.draft.attachment = Some(image);
    if extracted.defaulted.is_empty() {
        debug!("receipt extraction produced a complete draft");
    } else {
        let fields: Vec<String> = extracted.defaulted.iter().map(|f| f.to_string()).collect();
        warn!(fields = %fields.join(","), "receipt extraction fields defaulted");
    }
    Ok(extracted)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn canonical_candidate(name: &str, candidates: &[String]) -> Option<String> {
    let wanted = name.trim();
    candidates
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
        .cloned()
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(value)) => Ok(Some(value)),
        Some(RawAmount::Text(text)) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | ' '))
                .collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            Ok(cleaned.parse::<f64>().ok())
        }
    }
}
