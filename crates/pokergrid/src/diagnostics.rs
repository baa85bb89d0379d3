use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Failure category; decides the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Filesystem,
    Schema,
    Invariant,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Filesystem => "filesystem",
            Kind::Schema => "schema",
            Kind::Invariant => "invariant",
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Kind::Invariant => 2,
            Kind::Filesystem | Kind::Schema => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    CoreInvariants,
    LegendSchema,
    ScenariosSchema,
    Allowlist,
    Layers,
    Reachability,
    HashLock,
}

impl CheckId {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::CoreInvariants => "core-invariants",
            CheckId::LegendSchema => "legend-schema",
            CheckId::ScenariosSchema => "scenarios-schema",
            CheckId::Allowlist => "allowlist",
            CheckId::Layers => "layers",
            CheckId::Reachability => "reachability",
            CheckId::HashLock => "hash-lock",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub kind: Kind,
    pub check: CheckId,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    pub data: BTreeMap<String, Value>,
}

pub type CheckResult<T> = Result<T, Box<Diagnostic>>;

impl Diagnostic {
    pub fn new(check: CheckId, kind: Kind, code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            kind,
            check,
            message: message.into(),
            file: None,
            record: None,
            cell: None,
            data: BTreeMap::new(),
        }
    }

    pub fn filesystem(check: CheckId, code: &str, message: impl Into<String>) -> Self {
        Self::new(check, Kind::Filesystem, code, message)
    }

    pub fn schema(check: CheckId, code: &str, message: impl Into<String>) -> Self {
        Self::new(check, Kind::Schema, code, message)
    }

    pub fn invariant(check: CheckId, code: &str, message: impl Into<String>) -> Self {
        Self::new(check, Kind::Invariant, code, message)
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    pub fn with_cell(mut self, cell: impl Into<String>) -> Self {
        self.cell = Some(cell.into());
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error {} [{}] {}",
            self.code,
            self.kind.as_str(),
            self.message
        )?;
        if let Some(file) = &self.file {
            write!(f, "\n  file: {file}")?;
        }
        if let Some(record) = &self.record {
            write!(f, "\n  record: {record}")?;
        }
        if let Some(cell) = &self.cell {
            write!(f, "\n  cell: {cell}")?;
        }
        for (key, value) in &self.data {
            match value {
                Value::String(s) => write!(f, "\n  {key}: {s}")?,
                other => write!(f, "\n  {key}: {other}")?,
            }
        }
        Ok(())
    }
}
