use std::borrow::Cow;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{EUC_KR, UTF_8};

use crate::{CoreError, CoreResult};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Candidate labels in attempt order. EUC-KR in the whatwg encoding set is
/// the windows-949 superset, so it accepts both cp949 and euc-kr exports.
pub(crate) const ENCODING_CANDIDATES: [&str; 3] = ["utf-8", "utf-8-sig", "euc-kr"];

/// The decoded, still-raw tabular form of the uploaded file. Rows keep file
/// order and are padded to the column count at construction.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub cells: Vec<String>,
}

impl Ledger {
    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub(crate) fn cell<'a>(&self, row: &'a RawRow, column_index: usize) -> &'a str {
        row.cells.get(column_index).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DecodedLedger {
    pub ledger: Ledger,
    pub encoding: &'static str,
}

/// Tries each candidate encoding in order and parses the first clean decode
/// as CSV. Only encoding-level failures trigger fallback; a wrong-but-
/// decodable encoding is accepted as-is.
pub(crate) fn decode_ledger(bytes: &[u8]) -> CoreResult<DecodedLedger> {
    let mut last_cause = String::from("input was empty");

    for label in ENCODING_CANDIDATES {
        match attempt_decode(label, bytes) {
            Ok(text) => {
                let ledger = parse_csv_text(&text)?;
                return Ok(DecodedLedger {
                    ledger,
                    encoding: label,
                });
            }
            Err(cause) => last_cause = cause,
        }
    }

    Err(CoreError::decode_failed(&ENCODING_CANDIDATES, &last_cause))
}

fn attempt_decode(label: &str, bytes: &[u8]) -> Result<String, String> {
    match label {
        "utf-8" => {
            // A BOM-prefixed file belongs to the utf-8-sig candidate;
            // accepting it here would leave U+FEFF glued to the first header.
            if bytes.starts_with(&UTF8_BOM) {
                return Err("utf-8: input carries a byte-order mark".to_string());
            }
            decode_strict(UTF_8, bytes).ok_or_else(|| "utf-8: invalid byte sequence".to_string())
        }
        "utf-8-sig" => {
            let Some(body) = bytes.strip_prefix(UTF8_BOM.as_slice()) else {
                return Err("utf-8-sig: no byte-order mark present".to_string());
            };
            decode_strict(UTF_8, body)
                .ok_or_else(|| "utf-8-sig: invalid byte sequence after mark".to_string())
        }
        "euc-kr" => {
            decode_strict(EUC_KR, bytes).ok_or_else(|| "euc-kr: invalid byte sequence".to_string())
        }
        other => Err(format!("unknown encoding candidate `{other}`")),
    }
}

fn decode_strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

fn parse_csv_text(text: &str) -> CoreResult<Ledger> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns = reader
        .headers()
        .map_err(|error| {
            CoreError::invalid_argument_with_recovery(
                &format!("CSV header row is missing or unreadable: {error}"),
                vec!["Ensure the first line names the columns (e.g. 날짜,내용,금액).".to_string()],
            )
        })?
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>();

    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(CoreError::invalid_argument_with_recovery(
            "The file has no usable header row.",
            vec!["Ensure the first line names the columns (e.g. 날짜,내용,금액).".to_string()],
        ));
    }

    let width = columns.len();
    let mut rows = Vec::new();
    for result_row in reader.records() {
        let record = result_row.map_err(|error| {
            CoreError::invalid_argument_with_recovery(
                &format!("A CSV row is malformed: {error}"),
                vec!["Check for unbalanced quotes in the file.".to_string()],
            )
        })?;

        let mut cells = record
            .iter()
            .take(width)
            .map(|value| value.to_string())
            .collect::<Vec<String>>();
        cells.resize(width, String::new());
        rows.push(RawRow { cells });
    }

    Ok(Ledger { columns, rows })
}
