//! Flat CSV projection of the ledger.

use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::{errors::LedgerError, ledger::Transaction, utils::persistence::write_atomic};

pub const CSV_HEADERS: [&str; 7] = [
    "ID",
    "Date",
    "Source",
    "Amount",
    "Type",
    "Category",
    "Attachment",
];

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord<'a> {
    pub id: String,
    pub date: String,
    pub source: &'a str,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: &'a str,
    pub attachment: &'a str,
}

impl<'a> From<&'a Transaction> for ExportRecord<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            source: &txn.source,
            amount: txn.amount.to_string(),
            kind: txn.kind.as_str(),
            category: &txn.category,
            attachment: txn.attachment.as_deref().unwrap_or(""),
        }
    }
}

/// `steward_transactions_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("steward_transactions_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the header and one row per transaction, in the given order.
pub fn write_csv<'a, W, I>(transactions: I, writer: W) -> Result<(), LedgerError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for txn in transactions {
        csv_writer.serialize(ExportRecord::from(txn))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string<'a, I>(transactions: I) -> Result<String, LedgerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buffer = Vec::new();
    write_csv(transactions, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| LedgerError::Persistence(err.to_string()))
}

/// Writes the export into `dir` under the dated file name and returns its path.
pub fn export_to_dir<'a, I>(
    transactions: I,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, LedgerError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let path = dir.join(export_file_name(date));
    let content = to_csv_string(transactions)?;
    write_atomic(&path, &content)?;
    info!(path = %path.display(), "transactions exported");
    Ok(path)
}
