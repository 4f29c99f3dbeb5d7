use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const COFFEE_OFX: &str = r#"OFXHEADER:100
DATA:OFXSGML
VERSION:102

<OFX>
<BANKMSGSRSV1>
<STMTTRNRS>
<STMTRS>
<CURDEF>USD
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20230501
<TRNAMT>-4.50
<FITID>1
<MEMO>Coffee
</STMTTRN>
</BANKTRANLIST>
</STMTRS>
</STMTTRNRS>
</BANKMSGSRSV1>
</OFX>
"#;

const CARD_OFX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OFX>
  <CREDITCARDMSGSRSV1>
    <CCSTMTTRNRS>
      <CCSTMTRS>
        <CURDEF>BRL</CURDEF>
        <BANKTRANLIST>
          <STMTTRN>
            <TRNTYPE>DEBIT</TRNTYPE>
            <DTPOSTED>20240315093000[-3:BRT]</DTPOSTED>
            <TRNAMT>-1234.56</TRNAMT>
            <FITID>a1</FITID>
            <NAME>Livraria</NAME>
            <MEMO>Livros</MEMO>
          </STMTTRN>
          <STMTTRN>
            <TRNTYPE>CREDIT</TRNTYPE>
            <DTPOSTED>20240316</DTPOSTED>
            <TRNAMT>50</TRNAMT>
            <FITID>a2</FITID>
            <NAME>Estorno</NAME>
          </STMTTRN>
        </BANKTRANLIST>
      </CCSTMTRS>
    </CCSTMTTRNRS>
  </CREDITCARDMSGSRSV1>
</OFX>
"#;

/// Working directory with one input file; runs happen inside it so no
/// stray `etc/` directory is picked up.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn with_input(name: &str, content: &[u8]) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(name), content).unwrap();
        Workspace { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ofx2csv").unwrap();
        cmd.current_dir(self.dir.path()).env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn converts_with_defaults_to_stdout() {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd()
        .arg("coffee.ofx")
        .assert()
        .success()
        .stdout("ID,Date,Type,Memo,Amount\n1,2023-05-01,DEBIT,Coffee,-$4.50\n")
        .stderr("");
}

#[test]
fn selects_and_orders_columns() {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd()
        .args(["--columns", "date,amount", "coffee.ofx"])
        .assert()
        .success()
        .stdout("Date,Amount\n2023-05-01,-$4.50\n");
}

#[test]
fn missing_input_file_fails() {
    let ws = Workspace::with_input("other.ofx", b"");

    ws.cmd()
        .arg("nonexistent.ofx")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("nonexistent.ofx"));
}

#[test]
fn malformed_input_fails_with_reason_and_path() {
    let ws = Workspace::with_input("garbage.ofx", b"this is not a statement\n");

    ws.cmd()
        .arg("garbage.ofx")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Missing <OFX> tag"))
        .stderr(predicate::str::contains("garbage.ofx"));
}

#[test]
fn unsupported_locale_fails_before_reading_input() {
    let ws = Workspace::with_input("other.ofx", b"");

    ws.cmd()
        .args(["--locale", "xx_XX", "nonexistent.ofx"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Unsupported locale"))
        .stderr(predicate::str::contains("Failed to read").not());
}

#[test]
fn writes_output_file_identically_on_rerun() {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd()
        .args(["-o", "coffee.csv", "coffee.ofx"])
        .assert()
        .success()
        .stdout("");
    let first = fs::read(ws.path("coffee.csv")).unwrap();
    assert_eq!(
        String::from_utf8(first.clone()).unwrap(),
        "ID,Date,Type,Memo,Amount\n1,2023-05-01,DEBIT,Coffee,-$4.50\n"
    );

    ws.cmd().args(["-o", "coffee.csv", "coffee.ofx"]).assert().success();
    assert_eq!(fs::read(ws.path("coffee.csv")).unwrap(), first);
}

#[test]
fn failed_parse_leaves_no_output_file() {
    let ws = Workspace::with_input("garbage.ofx", b"<OFX>\n<BANKMSGSRSV1>\n");

    ws.cmd()
        .args(["--output", "garbage.csv", "garbage.ofx"])
        .assert()
        .failure();
    assert!(!ws.path("garbage.csv").exists());
}

#[test]
fn timezone_date_format_fails_before_creating_output() {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd()
        .args(["--date-format", "%d/%m/%Y %Z", "-o", "coffee.csv", "coffee.ofx"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("carry no timezone"));
    assert!(!ws.path("coffee.csv").exists());
}

#[test]
fn credit_card_statement_with_locale_options() {
    let ws = Workspace::with_input("card.ofx", CARD_OFX.as_bytes());

    ws.cmd()
        .args([
            "--locale",
            "pt_BR",
            "--columns",
            "date,payee,amount",
            "--column-name",
            "date=Data",
            "--column-name",
            "payee=Favorecido",
            "--column-name",
            "amount=Valor",
            "--date-format",
            "%d/%m/%Y %H:%M",
            "--delimiter",
            ";",
            "card.ofx",
        ])
        .assert()
        .success()
        .stdout(
            "Data;Favorecido;Valor\n\
             15/03/2024 09:30;Livraria;-R$\u{a0}1.234,56\n\
             16/03/2024 00:00;Estorno;R$\u{a0}50,00\n",
        );
}

#[test]
fn symbol_currency_style() {
    let ws = Workspace::with_input("card.ofx", CARD_OFX.as_bytes());

    ws.cmd()
        .args([
            "--columns",
            "id,amount",
            "--currency-style",
            "symbol",
            "--currency-symbol",
            "BRL",
            "--currency-format",
            "{sign}{amount} {symbol}",
            "card.ofx",
        ])
        .assert()
        .success()
        .stdout("ID,Amount\na1,\"-1,234.56 BRL\"\na2,50.00 BRL\n");
}

#[test]
fn decodes_latin1_input() {
    // 0xE9 is "é" in Latin-1 and invalid on its own in UTF-8
    let content: Vec<u8> = COFFEE_OFX
        .replace("Coffee", "Caf~")
        .bytes()
        .map(|b| if b == b'~' { 0xe9 } else { b })
        .collect();
    let ws = Workspace::with_input("latin1.ofx", &content);

    ws.cmd()
        .args(["--columns", "memo", "latin1.ofx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("utf-8").or(predicate::str::contains("UTF-8")));

    ws.cmd()
        .args(["-e", "latin-1", "--columns", "memo", "latin1.ofx"])
        .assert()
        .success()
        .stdout("Memo\nCafé\n");
}

#[test]
fn config_files_apply_below_command_line() {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());
    fs::create_dir(ws.path("etc")).unwrap();
    fs::write(
        ws.path("etc/ofx2csv.json"),
        r#"{"columns": ["memo", "amount"], "column_names": {"memo": "Description"}}"#,
    )
    .unwrap();

    ws.cmd()
        .arg("coffee.ofx")
        .assert()
        .success()
        .stdout("Description,Amount\nCoffee,-$4.50\n");

    ws.cmd()
        .args(["--columns", "id", "coffee.ofx"])
        .assert()
        .success()
        .stdout("ID\n1\n");
}

#[rstest]
#[case::unknown_column(&["--columns", "id,balance"], "balance")]
#[case::bad_date_format(&["--date-format", "%Y-%Q"], "invalid date format")]
#[case::timezone_date_format(&["--date-format", "%Y-%m-%d %z", "-o", "out.csv"], "carry no timezone")]
#[case::unknown_encoding(&["-e", "klingon"], "unknown encoding")]
#[case::bad_config_file(&["--config-file", "missing.json"], "missing.json")]
fn rejects_bad_configuration(#[case] args: &[&str], #[case] expected: &str) {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd()
        .args(args)
        .arg("coffee.ofx")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(expected));
}

#[rstest]
#[case::no_input(&[])]
#[case::bad_dialect(&["--dialect", "tsv", "coffee.ofx"])]
fn usage_errors_exit_with_two(#[case] args: &[&str]) {
    let ws = Workspace::with_input("coffee.ofx", COFFEE_OFX.as_bytes());

    ws.cmd().args(args).assert().code(2);
}
