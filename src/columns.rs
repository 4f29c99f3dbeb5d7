//! The closed set of output columns and how each one reads a transaction.

use std::{fmt, str::FromStr};

use crate::types::{FieldValue, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// `FITID`
    Id,
    /// `DTPOSTED`
    Date,
    /// `TRNTYPE`: CREDIT, DEBIT, INT, DIV, FEE, SRVCHG, DEP, ATM, POS, XFER,
    /// CHECK, PAYMENT, CASH, DIRECTDEP, DIRECTDEBIT, REPEATPMT, HOLD, OTHER
    Type,
    /// `MEMO`
    Memo,
    /// `TRNAMT`
    Amount,
    /// `NAME`
    Payee,
    /// `CHECKNUM`
    CheckNum,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Date,
        Column::Type,
        Column::Memo,
        Column::Amount,
        Column::Payee,
        Column::CheckNum,
    ];

    pub const DEFAULT_ORDER: [Column; 5] = [
        Column::Id,
        Column::Date,
        Column::Type,
        Column::Memo,
        Column::Amount,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Date => "date",
            Column::Type => "type",
            Column::Memo => "memo",
            Column::Amount => "amount",
            Column::Payee => "payee",
            Column::CheckNum => "checknum",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Date => "Date",
            Column::Type => "Type",
            Column::Memo => "Memo",
            Column::Amount => "Amount",
            Column::Payee => "Payee",
            Column::CheckNum => "Check Number",
        }
    }

    /// Reads this column's attribute. Absent optional elements read as empty text.
    pub fn value<'a>(&self, txn: &'a Transaction) -> FieldValue<'a> {
        let text = |v: &'a Option<String>| FieldValue::Text(v.as_deref().unwrap_or_default());

        match self {
            Column::Id => text(&txn.fitid),
            Column::Date => FieldValue::Date(txn.date),
            Column::Type => FieldValue::Text(&txn.transaction_type),
            Column::Memo => text(&txn.memo),
            Column::Amount => FieldValue::Amount(txn.amount),
            Column::Payee => text(&txn.payee),
            Column::CheckNum => text(&txn.checknum),
        }
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Column::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| {
                let known: Vec<_> = Column::ALL.iter().map(Column::key).collect();
                format!("unknown column {:?} (expected one of: {})", s, known.join(", "))
            })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
