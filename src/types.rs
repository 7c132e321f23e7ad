//! The four column type labels produced by inference.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TyperError;

/// Inferred type of a column.
///
/// Labels are ordered from most to least specific: a column is `Int` only if
/// every non-blank value is an integer, and `String` is the fallback when no
/// stricter hypothesis survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Date,
    #[default]
    String,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [
        ColumnType::Int,
        ColumnType::Float,
        ColumnType::Date,
        ColumnType::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = TyperError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "int" | "integer" => Ok(ColumnType::Int),
            "float" | "double" => Ok(ColumnType::Float),
            "date" => Ok(ColumnType::Date),
            "string" | "text" => Ok(ColumnType::String),
            _ => Err(TyperError::UnknownType(value.to_string())),
        }
    }
}
