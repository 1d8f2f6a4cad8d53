//! Record shapes read from transfer and view dumps

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Field delimiter used by transfer dumps
pub const TRANSFER_DELIMITER: char = ',';

/// Minimum number of fields a transfer dump line must carry
pub const TRANSFER_MIN_FIELDS: usize = 6;

/// On-disk format of the files in a dump directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `key,exp,flag,cas,rev,value` lines
    Transfer,
    /// `{"rows": [{"key": ..., "value": ...}]}` documents
    View,
}

impl RecordFormat {
    pub fn name(&self) -> &'static str {
        match self {
            RecordFormat::Transfer => "transfer",
            RecordFormat::View => "view",
        }
    }
}

/// Metadata and payload of one key in a transfer dump.
///
/// The scalar fields are kept as the exact text found in the dump. CAS values
/// regularly exceed 64 bits and nothing here needs their numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub expiry: String,
    pub flag: String,
    pub cas: String,
    pub revision: String,
    /// Everything from the sixth field onward, still split on the delimiter
    pub payload: Vec<String>,
}

impl TransferRecord {
    /// Parse one dump line into its key and record.
    ///
    /// Returns `None` for lines with fewer than six fields. No quoting or
    /// escaping is recognised, so commas inside the value end up as extra
    /// payload segments.
    pub fn parse_line(line: &str) -> Option<(String, TransferRecord)> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(TRANSFER_DELIMITER).collect();
        if fields.len() < TRANSFER_MIN_FIELDS {
            return None;
        }

        let record = TransferRecord {
            expiry: fields[1].to_string(),
            flag: fields[2].to_string(),
            cas: fields[3].to_string(),
            revision: fields[4].to_string(),
            payload: fields[5..].iter().map(|s| s.to_string()).collect(),
        };

        Some((fields[0].to_string(), record))
    }

    /// Payload rejoined as it appeared in the dump
    pub fn value(&self) -> String {
        self.payload.join(&TRANSFER_DELIMITER.to_string())
    }

    /// Text of a single field, in dump order
    pub fn field(&self, field: TransferField) -> String {
        match field {
            TransferField::Expiry => self.expiry.clone(),
            TransferField::Flag => self.flag.clone(),
            TransferField::Cas => self.cas.clone(),
            TransferField::Revision => self.revision.clone(),
            TransferField::Value => self.value(),
        }
    }
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exp: {}, Flag: {}, CAS: {}, Rev Id: {}, Value: {}",
            self.expiry,
            self.flag,
            self.cas,
            self.revision,
            self.value()
        )
    }
}

/// Tracked fields of a transfer record, in the order they are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransferField {
    Expiry,
    Flag,
    Cas,
    Revision,
    Value,
}

impl TransferField {
    pub const ALL: [TransferField; 5] = [
        TransferField::Expiry,
        TransferField::Flag,
        TransferField::Cas,
        TransferField::Revision,
        TransferField::Value,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransferField::Expiry => "Exp",
            TransferField::Flag => "Flag",
            TransferField::Cas => "CAS",
            TransferField::Revision => "Rev",
            TransferField::Value => "Value",
        }
    }
}

/// Value emitted for a key by a view query, usually the document revision
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRecord {
    pub revision: Value,
}

impl fmt::Display for ViewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Top-level shape of a view dump file
#[derive(Debug, Deserialize)]
pub struct ViewDump {
    pub rows: Vec<ViewRow>,
}

/// One row of a view dump. Other row fields such as `id` are ignored.
#[derive(Debug, Deserialize)]
pub struct ViewRow {
    /// Any emitted key; views may emit numbers or arrays as well as strings
    pub key: Value,
    #[serde(default)]
    pub value: Value,
}

impl ViewRow {
    /// Key as compared across dumps: strings verbatim, anything else as its
    /// JSON text
    pub fn key_text(&self) -> String {
        match &self.key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
