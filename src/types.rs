use crate::{builder::ParsedStatement, errors::StatementParseError, parsers::prelude::*};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One `STMTTRN` entry with its values converted to native types.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub fitid: Option<String>,
    pub date: NaiveDateTime,
    pub transaction_type: String,
    pub amount: Decimal,
    pub payee: Option<String>,
    pub memo: Option<String>,
    pub checknum: Option<String>,
}

/// Transactions of one statement in document order, plus its `CURDEF`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub currency: Option<String>,
    pub transactions: Vec<Transaction>,
}

/// A single attribute of a transaction, tagged by how it must be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Date(NaiveDateTime),
    Amount(Decimal),
}

impl TryFrom<ParsedStatement> for Statement {
    type Error = StatementParseError;

    fn try_from(parsed: ParsedStatement) -> Result<Self, Self::Error> {
        let ParsedStatement::Ofx(ofx) = parsed;
        ofx.try_into()
    }
}

impl TryFrom<OfxStatement> for Statement {
    type Error = StatementParseError;

    fn try_from(ofx: OfxStatement) -> Result<Self, Self::Error> {
        Ok(Statement {
            currency: ofx.currency,
            transactions: ofx
                .transactions
                .into_iter()
                .map(Transaction::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<OfxTransaction> for Transaction {
    type Error = StatementParseError;

    fn try_from(txn: OfxTransaction) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: txn.dt_posted.try_into()?,
            transaction_type: txn.trn_type,
            amount: txn.amount,
            fitid: txn.fitid,
            payee: txn.name,
            memo: txn.memo,
            checknum: txn.checknum,
        })
    }
}
