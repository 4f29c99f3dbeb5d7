use rust_decimal::Decimal;
use serde::Deserialize;

use super::types::OfxDate;

#[derive(Debug, Deserialize)]
pub(super) struct OfxBankMsgsRsV1 {
    #[serde(rename = "STMTTRNRS")]
    pub(super) stmt_trn_rs: OfxStmtTrnRs,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxCreditCardMsgsRsV1 {
    #[serde(rename = "CCSTMTTRNRS")]
    pub(super) cc_stmt_trn_rs: OfxCcStmtTrnRs,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxStmtTrnRs {
    #[serde(rename = "STMTRS")]
    pub(super) stmt_rs: OfxStmtRs,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxCcStmtTrnRs {
    #[serde(rename = "CCSTMTRS")]
    pub(super) cc_stmt_rs: OfxStmtRs,
}

/// Body shared by `STMTRS` and `CCSTMTRS`
#[derive(Debug, Deserialize)]
pub(super) struct OfxStmtRs {
    #[serde(rename = "CURDEF", default)]
    pub(super) currency: Option<String>,
    #[serde(rename = "BANKTRANLIST")]
    pub(super) bank_transaction_list: OfxBankTransactionList,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxBankTransactionList {
    #[serde(rename = "STMTTRN", default)]
    pub(super) transactions: Vec<OfxTransactionRaw>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxXml {
    #[serde(rename = "BANKMSGSRSV1")]
    pub(super) bank_msgs: Option<OfxBankMsgsRsV1>,
    #[serde(rename = "CREDITCARDMSGSRSV1")]
    pub(super) cc_msgs: Option<OfxCreditCardMsgsRsV1>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OfxTransactionRaw {
    #[serde(rename = "TRNTYPE")]
    trn_type: String,
    #[serde(rename = "DTPOSTED")]
    dt_posted: OfxDate,
    #[serde(rename = "TRNAMT")]
    amount: String,
    #[serde(rename = "FITID", default)]
    fitid: Option<String>,
    #[serde(rename = "CHECKNUM", default)]
    checknum: Option<String>,
    #[serde(rename = "NAME", default)]
    name: Option<String>,
    #[serde(rename = "MEMO", default)]
    memo: Option<String>,
}

/// A `STMTTRN` with its amount parsed; the date stays raw.
#[derive(Debug, Clone)]
pub struct OfxTransaction {
    pub trn_type: String,
    pub dt_posted: OfxDate,
    pub amount: Decimal,
    pub fitid: Option<String>,
    pub checknum: Option<String>,
    pub name: Option<String>,
    pub memo: Option<String>,
}

/// One statement as found in the document, before date conversion
#[derive(Debug, Clone)]
pub struct OfxStatement {
    pub currency: Option<String>,
    pub transactions: Vec<OfxTransaction>,
}

impl OfxStatement {
    pub(super) fn from_raw(raw: OfxStmtRs) -> Result<Self, String> {
        let transactions = raw
            .bank_transaction_list
            .transactions
            .into_iter()
            .map(OfxTransaction::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OfxStatement {
            currency: raw
                .currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty()),
            transactions,
        })
    }
}

impl OfxTransaction {
    pub(super) fn from_raw(raw: OfxTransactionRaw) -> Result<Self, String> {
        Ok(OfxTransaction {
            trn_type: raw.trn_type.trim().to_string(),
            dt_posted: raw.dt_posted,
            amount: parse_amount(&raw.amount)?,
            fitid: raw.fitid,
            checknum: raw.checknum,
            name: raw.name,
            memo: raw.memo,
        })
    }
}

/// Parses `TRNAMT`. Some institutions write a comma as the decimal separator,
/// which is only accepted when no dot is present.
fn parse_amount(value: &str) -> Result<Decimal, String> {
    use std::str::FromStr;

    let trimmed = value.trim();
    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).map_err(|e| format!("Invalid amount {:?}: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn raw(amount: &str) -> OfxTransactionRaw {
        OfxTransactionRaw {
            trn_type: " XFER ".to_string(),
            dt_posted: "20230301".into(),
            amount: amount.to_string(),
            fitid: None,
            checknum: Some("88".to_string()),
            name: None,
            memo: Some("rent".to_string()),
        }
    }

    #[rstest]
    #[case("-4.50", "-4.50")]
    #[case("  12 ", "12")]
    #[case("+7.25", "7.25")]
    #[case("-4,50", "-4.50")]
    #[case("0,001", "0.001")]
    #[case("1234.5678", "1234.5678")]
    fn test_parse_amount(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(parse_amount(value).unwrap(), Decimal::from_str(expected).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("ten")]
    #[case("€5")]
    #[case("1,234.56")]
    #[case("1,234,56")]
    fn test_parse_amount_rejects(#[case] value: &str) {
        let err = parse_amount(value).unwrap_err();
        assert!(err.starts_with("Invalid amount"), "{err}");
    }

    #[test]
    fn test_transaction_from_raw() {
        let txn = OfxTransaction::from_raw(raw("-950.00")).unwrap();

        assert_eq!(txn.trn_type, "XFER");
        assert_eq!(txn.amount, Decimal::new(-95000, 2));
        assert_eq!(txn.checknum.as_deref(), Some("88"));
        assert_eq!(txn.memo.as_deref(), Some("rent"));
        assert_eq!(txn.fitid, None);
    }

    #[rstest]
    #[case(Some(" brl "), Some("BRL"))]
    #[case(Some("EUR"), Some("EUR"))]
    #[case(Some("  "), None)]
    #[case(None, None)]
    fn test_statement_currency(#[case] curdef: Option<&str>, #[case] expected: Option<&str>) {
        let statement = OfxStatement::from_raw(OfxStmtRs {
            currency: curdef.map(str::to_string),
            bank_transaction_list: OfxBankTransactionList {
                transactions: vec![raw("1")],
            },
        })
        .unwrap();

        assert_eq!(statement.currency.as_deref(), expected);
        assert_eq!(statement.transactions.len(), 1);
    }

    #[test]
    fn test_statement_fails_on_bad_amount() {
        let result = OfxStatement::from_raw(OfxStmtRs {
            currency: None,
            bank_transaction_list: OfxBankTransactionList {
                transactions: vec![raw("1"), raw("n/a")],
            },
        });
        assert!(result.is_err());
    }
}
