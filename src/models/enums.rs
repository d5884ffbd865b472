use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value:?}")]
pub struct EnumParseError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(EnumParseError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Clinical status derived by comparing a value with its reference range.
    LabStatus {
        Normal => "Normal",
        /// Inside the range but within the proximity band of an edge.
        Near => "Near",
        Low => "Low",
        High => "High",
    }
);

impl LabStatus {
    /// `Low` and `High` both count as abnormal in summaries.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::Low | Self::High)
    }
}

str_enum!(
    /// Which layout pattern produced a parsed row. Kept for diagnostics only.
    RowLayout {
        TableCells => "table_cells",
        ParenthesizedRange => "parenthesized_range",
        InlineRange => "inline_range",
        SplitBounds => "split_bounds",
    }
);
