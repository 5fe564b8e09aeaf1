mod common;

use std::fs;

use common::{date, fixed_transaction, income, setup_manager, temp_base};
use insta::assert_snapshot;
use steward_core::{
    export::{export_file_name, to_csv_string},
    ledger::{Ledger, TransactionKind},
};

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_transaction(fixed_transaction(
        1,
        date(2024, 1, 12),
        "Acme Corp",
        4200.0,
        TransactionKind::Income,
        "Client Payment",
    ));
    ledger.add_transaction(
        fixed_transaction(
            2,
            date(2024, 2, 3),
            "Rail, \"Express\"",
            86.4,
            TransactionKind::Expense,
            "Travel",
        )
        .with_attachment("data:image/png;base64,iVBORw0KGgo="),
    );
    ledger.add_transaction(fixed_transaction(
        3,
        date(2024, 2, 3),
        "Paper & Ink",
        19.99,
        TransactionKind::Expense,
        "Office Supplies",
    ));
    ledger
}

#[test]
fn csv_export_layout() {
    let csv = to_csv_string(sample_ledger().transactions()).unwrap();
    assert_snapshot!("transactions_export", csv);
}

#[test]
fn export_writes_dated_file() {
    let (mut manager, _base) = setup_manager();
    manager.add_transaction(income(1_500.0)).unwrap();
    let dir = temp_base();

    let path = manager.export_csv(&dir).unwrap();
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some(export_file_name(date(2024, 5, 1)).as_str())
    );
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, manager.export_csv_string().unwrap());
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().nth(1).unwrap().contains(",1500,income,Client Payment,"));
}
