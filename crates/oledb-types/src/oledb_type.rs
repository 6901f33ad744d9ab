//! OLE DB data type indicators.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Data type of a parameter or column, as reported by an OLE DB provider.
///
/// The discriminants are the `DBTYPE` indicator values from the OLE DB
/// headers, so a provider-reported code converts with [`OleDbType::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum OleDbType {
    /// No value (`DBTYPE_EMPTY`).
    #[default]
    Empty = 0,
    /// 16-bit signed integer (`DBTYPE_I2`).
    SmallInt = 2,
    /// 32-bit signed integer (`DBTYPE_I4`).
    Integer = 3,
    /// Single precision float (`DBTYPE_R4`).
    Single = 4,
    /// Double precision float (`DBTYPE_R8`).
    Double = 5,
    /// Currency scaled by 10,000 (`DBTYPE_CY`).
    Currency = 6,
    /// OLE automation date (`DBTYPE_DATE`).
    Date = 7,
    /// Null-terminated Unicode string (`DBTYPE_BSTR`).
    Bstr = 8,
    /// Boolean (`DBTYPE_BOOL`).
    Boolean = 11,
    /// Automation variant (`DBTYPE_VARIANT`).
    Variant = 12,
    /// Fixed precision decimal (`DBTYPE_DECIMAL`).
    Decimal = 14,
    /// 8-bit signed integer (`DBTYPE_I1`).
    TinyInt = 16,
    /// 8-bit unsigned integer (`DBTYPE_UI1`).
    UnsignedTinyInt = 17,
    /// 16-bit unsigned integer (`DBTYPE_UI2`).
    UnsignedSmallInt = 18,
    /// 32-bit unsigned integer (`DBTYPE_UI4`).
    UnsignedInt = 19,
    /// 64-bit signed integer (`DBTYPE_I8`).
    BigInt = 20,
    /// 64-bit unsigned integer (`DBTYPE_UI8`).
    UnsignedBigInt = 21,
    /// Windows file time (`DBTYPE_FILETIME`).
    Filetime = 64,
    /// Globally unique identifier (`DBTYPE_GUID`).
    Guid = 72,
    /// Fixed-length binary (`DBTYPE_BYTES`).
    Binary = 128,
    /// Fixed-length ANSI string (`DBTYPE_STR`).
    Char = 129,
    /// Fixed-length Unicode string (`DBTYPE_WSTR`).
    WChar = 130,
    /// Exact numeric (`DBTYPE_NUMERIC`).
    Numeric = 131,
    /// Date (`DBTYPE_DBDATE`).
    DbDate = 133,
    /// Time of day (`DBTYPE_DBTIME`).
    DbTime = 134,
    /// Date and time (`DBTYPE_DBTIMESTAMP`).
    DbTimeStamp = 135,
    /// Variable-length numeric (`DBTYPE_VARNUMERIC`).
    VarNumeric = 139,
    /// Variable-length ANSI string.
    VarChar = 200,
    /// Long ANSI string.
    LongVarChar = 201,
    /// Variable-length Unicode string.
    VarWChar = 202,
    /// Long Unicode string.
    LongVarWChar = 203,
    /// Variable-length binary.
    VarBinary = 204,
    /// Long binary.
    LongVarBinary = 205,
}

const ALL: [OleDbType; 33] = [
    OleDbType::Empty,
    OleDbType::SmallInt,
    OleDbType::Integer,
    OleDbType::Single,
    OleDbType::Double,
    OleDbType::Currency,
    OleDbType::Date,
    OleDbType::Bstr,
    OleDbType::Boolean,
    OleDbType::Variant,
    OleDbType::Decimal,
    OleDbType::TinyInt,
    OleDbType::UnsignedTinyInt,
    OleDbType::UnsignedSmallInt,
    OleDbType::UnsignedInt,
    OleDbType::BigInt,
    OleDbType::UnsignedBigInt,
    OleDbType::Filetime,
    OleDbType::Guid,
    OleDbType::Binary,
    OleDbType::Char,
    OleDbType::WChar,
    OleDbType::Numeric,
    OleDbType::DbDate,
    OleDbType::DbTime,
    OleDbType::DbTimeStamp,
    OleDbType::VarNumeric,
    OleDbType::VarChar,
    OleDbType::LongVarChar,
    OleDbType::VarWChar,
    OleDbType::LongVarWChar,
    OleDbType::VarBinary,
    OleDbType::LongVarBinary,
];

impl OleDbType {
    /// Get the `DBTYPE` indicator value.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Convert a provider-reported `DBTYPE` indicator.
    pub fn from_code(code: u16) -> Result<Self, TypeError> {
        ALL.iter()
            .copied()
            .find(|ty| ty.code() == code)
            .ok_or(TypeError::UnknownTypeCode(code))
    }

    /// Get the enumeration name (`"Integer"`, `"VarWChar"`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::SmallInt => "SmallInt",
            Self::Integer => "Integer",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Currency => "Currency",
            Self::Date => "Date",
            Self::Bstr => "BSTR",
            Self::Boolean => "Boolean",
            Self::Variant => "Variant",
            Self::Decimal => "Decimal",
            Self::TinyInt => "TinyInt",
            Self::UnsignedTinyInt => "UnsignedTinyInt",
            Self::UnsignedSmallInt => "UnsignedSmallInt",
            Self::UnsignedInt => "UnsignedInt",
            Self::BigInt => "BigInt",
            Self::UnsignedBigInt => "UnsignedBigInt",
            Self::Filetime => "Filetime",
            Self::Guid => "Guid",
            Self::Binary => "Binary",
            Self::Char => "Char",
            Self::WChar => "WChar",
            Self::Numeric => "Numeric",
            Self::DbDate => "DBDate",
            Self::DbTime => "DBTime",
            Self::DbTimeStamp => "DBTimeStamp",
            Self::VarNumeric => "VarNumeric",
            Self::VarChar => "VarChar",
            Self::LongVarChar => "LongVarChar",
            Self::VarWChar => "VarWChar",
            Self::LongVarWChar => "LongVarWChar",
            Self::VarBinary => "VarBinary",
            Self::LongVarBinary => "LongVarBinary",
        }
    }

    /// Storage size in bytes for fixed-width types.
    ///
    /// Returns `None` for character, binary and variant types whose size
    /// comes from column or parameter metadata.
    #[must_use]
    pub fn fixed_size(self) -> Option<u32> {
        match self {
            Self::Empty => Some(0),
            Self::TinyInt | Self::UnsignedTinyInt => Some(1),
            Self::SmallInt | Self::UnsignedSmallInt | Self::Boolean => Some(2),
            Self::Integer | Self::UnsignedInt | Self::Single => Some(4),
            Self::BigInt
            | Self::UnsignedBigInt
            | Self::Double
            | Self::Currency
            | Self::Date
            | Self::Filetime => Some(8),
            Self::DbDate => Some(6),
            Self::DbTime => Some(6),
            Self::DbTimeStamp => Some(16),
            Self::Decimal | Self::Guid => Some(16),
            Self::Numeric => Some(19),
            _ => None,
        }
    }

    /// Whether values of this type are long data (BLOB/CLOB).
    ///
    /// Long columns cannot appear in a `WHERE` comparison.
    #[must_use]
    pub fn is_long(self) -> bool {
        matches!(
            self,
            Self::LongVarChar | Self::LongVarWChar | Self::LongVarBinary
        )
    }

    /// Whether this is a character type.
    #[must_use]
    pub fn is_character(self) -> bool {
        matches!(
            self,
            Self::Bstr
                | Self::Char
                | Self::WChar
                | Self::VarChar
                | Self::VarWChar
                | Self::LongVarChar
                | Self::LongVarWChar
        )
    }

    /// Whether precision and scale are meaningful for this type.
    #[must_use]
    pub fn has_precision(self) -> bool {
        matches!(self, Self::Decimal | Self::Numeric | Self::VarNumeric)
    }
}

impl fmt::Display for OleDbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for OleDbType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL.iter()
            .copied()
            .find(|ty| ty.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeError::UnknownTypeName(trimmed.to_string()))
    }
}

impl TryFrom<u16> for OleDbType {
    type Error = TypeError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for ty in ALL {
            assert_eq!(OleDbType::from_code(ty.code()).unwrap(), ty);
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(OleDbType::Integer.code(), 3);
        assert_eq!(OleDbType::VarWChar.code(), 202);
        assert_eq!(OleDbType::from_code(135).unwrap(), OleDbType::DbTimeStamp);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            OleDbType::from_code(999),
            Err(TypeError::UnknownTypeCode(999))
        );
    }

    #[test]
    fn test_parse_name_case_insensitive() {
        assert_eq!("integer".parse::<OleDbType>().unwrap(), OleDbType::Integer);
        assert_eq!("BSTR".parse::<OleDbType>().unwrap(), OleDbType::Bstr);
        assert_eq!(" DBTimeStamp ".parse::<OleDbType>().unwrap(), OleDbType::DbTimeStamp);
        assert!("nvarchar".parse::<OleDbType>().is_err());
    }

    #[test]
    fn test_long_types() {
        assert!(OleDbType::LongVarWChar.is_long());
        assert!(!OleDbType::VarWChar.is_long());
    }

    #[test]
    fn test_fixed_size() {
        assert_eq!(OleDbType::Integer.fixed_size(), Some(4));
        assert_eq!(OleDbType::VarChar.fixed_size(), None);
    }
}
