//! Core types used throughout SchemaForge
//!
//! This module contains the column vocabulary of the Laravel schema builder
//! and the size/precision arguments some column kinds accept.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Column Kinds
// ============================================================================

macro_rules! column_kinds {
    ($($variant:ident => $method:literal),+ $(,)?) => {
        /// A column method of the Laravel schema builder (`$table->string(...)`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ColumnKind {
            $($variant,)+
        }

        impl ColumnKind {
            /// Every supported column kind, in vocabulary order.
            pub const ALL: &'static [ColumnKind] = &[$(ColumnKind::$variant,)+];

            /// The schema-builder method name for this kind.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ColumnKind::$variant => $method,)+
                }
            }
        }
    };
}

column_kinds! {
    BigIncrements => "bigIncrements",
    BigInteger => "bigInteger",
    Binary => "binary",
    Boolean => "boolean",
    Char => "char",
    DateTimeTz => "dateTimeTz",
    DateTime => "dateTime",
    Date => "date",
    Decimal => "decimal",
    Double => "double",
    Enum => "enum",
    Float => "float",
    ForeignId => "foreignId",
    GeometryCollection => "geometryCollection",
    Geometry => "geometry",
    Increments => "increments",
    Integer => "integer",
    IpAddress => "ipAddress",
    Json => "json",
    Jsonb => "jsonb",
    LineString => "lineString",
    LongText => "longText",
    MacAddress => "macAddress",
    MediumIncrements => "mediumIncrements",
    MediumInteger => "mediumInteger",
    MediumText => "mediumText",
    Morphs => "morphs",
    MultiLineString => "multiLineString",
    MultiPoint => "multiPoint",
    MultiPolygon => "multiPolygon",
    NullableMorphs => "nullableMorphs",
    NullableTimestamps => "nullableTimestamps",
    NullableUuidMorphs => "nullableUuidMorphs",
    Point => "point",
    Polygon => "polygon",
    RememberToken => "rememberToken",
    Set => "set",
    SmallIncrements => "smallIncrements",
    SmallInteger => "smallInteger",
    SoftDeletesTz => "softDeletesTz",
    SoftDeletes => "softDeletes",
    String => "string",
    Text => "text",
    TimeTz => "timeTz",
    Time => "time",
    TimestampTz => "timestampTz",
    Timestamp => "timestamp",
    TimestampsTz => "timestampsTz",
    Timestamps => "timestamps",
    TinyIncrements => "tinyIncrements",
    TinyInteger => "tinyInteger",
    UnsignedBigInteger => "unsignedBigInteger",
    UnsignedDecimal => "unsignedDecimal",
    UnsignedInteger => "unsignedInteger",
    UnsignedMediumInteger => "unsignedMediumInteger",
    UnsignedSmallInteger => "unsignedSmallInteger",
    UnsignedTinyInteger => "unsignedTinyInteger",
    UuidMorphs => "uuidMorphs",
    Uuid => "uuid",
    Year => "year",
}

impl ColumnKind {
    /// Look up a kind by its method name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<ColumnKind> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether the builder method takes length/precision arguments after
    /// the column name.
    pub fn accepts_size(&self) -> bool {
        matches!(
            self,
            ColumnKind::Char
                | ColumnKind::String
                | ColumnKind::Decimal
                | ColumnKind::Double
                | ColumnKind::Float
                | ColumnKind::UnsignedDecimal
                | ColumnKind::DateTime
                | ColumnKind::DateTimeTz
                | ColumnKind::Time
                | ColumnKind::TimeTz
                | ColumnKind::Timestamp
                | ColumnKind::TimestampTz
                | ColumnKind::SoftDeletes
                | ColumnKind::SoftDeletesTz
        )
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not part of the column vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumnKind(pub String);

impl fmt::Display for UnknownColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumnKind {}

impl FromStr for ColumnKind {
    type Err = UnknownColumnKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownColumnKind(s.to_string()))
    }
}

// ============================================================================
// Size Arguments
// ============================================================================

/// Length/precision arguments taken from a column's multiplicity.
///
/// A multiplicity of the form `a..b` becomes two positional arguments.
/// Anything else is kept verbatim and passed through as a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeArgs {
    /// `total..places` split into two arguments
    Pair(String, String),
    /// Unsplit argument text (a single length, or a malformed range)
    Raw(String),
}

impl SizeArgs {
    /// Parse multiplicity text. Returns `None` for blank input.
    pub fn parse(text: &str) -> Option<SizeArgs> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let parts: Vec<&str> = text.split("..").map(str::trim).collect();
        match parts.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => {
                Some(SizeArgs::Pair(a.to_string(), b.to_string()))
            }
            _ => {
                if !is_plain_number(text) {
                    tracing::warn!(
                        multiplicity = text,
                        "multiplicity is not of the form 'a..b'; passing it through unsplit"
                    );
                }
                Some(SizeArgs::Raw(text.to_string()))
            }
        }
    }

    /// Render as builder arguments, e.g. `8, 2`.
    pub fn render(&self) -> String {
        match self {
            SizeArgs::Pair(a, b) => format!("{}, {}", a, b),
            SizeArgs::Raw(raw) => raw.clone(),
        }
    }
}

fn is_plain_number(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_size() {
        assert_eq!(ColumnKind::ALL.len(), 60);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ColumnKind::parse("bigIncrements"), Some(ColumnKind::BigIncrements));
        assert_eq!(ColumnKind::parse("BIGINCREMENTS"), Some(ColumnKind::BigIncrements));
        assert_eq!(ColumnKind::parse(" string "), Some(ColumnKind::String));
        assert_eq!(ColumnKind::parse("varchar"), None);
        assert_eq!(ColumnKind::parse(""), None);
    }

    #[test]
    fn test_similar_names_resolve_exactly() {
        assert_eq!(ColumnKind::parse("dateTime"), Some(ColumnKind::DateTime));
        assert_eq!(ColumnKind::parse("dateTimeTz"), Some(ColumnKind::DateTimeTz));
        assert_eq!(ColumnKind::parse("date"), Some(ColumnKind::Date));
        assert_eq!(ColumnKind::parse("timestamps"), Some(ColumnKind::Timestamps));
    }

    #[test]
    fn test_from_str() {
        let kind: ColumnKind = "decimal".parse().unwrap();
        assert_eq!(kind, ColumnKind::Decimal);

        let err = "money".parse::<ColumnKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown column kind 'money'");
    }

    #[test]
    fn test_accepts_size() {
        assert!(ColumnKind::String.accepts_size());
        assert!(ColumnKind::Decimal.accepts_size());
        assert!(!ColumnKind::Text.accepts_size());
        assert!(!ColumnKind::BigIncrements.accepts_size());
    }

    #[test]
    fn test_display_uses_method_name() {
        assert_eq!(ColumnKind::UnsignedBigInteger.to_string(), "unsignedBigInteger");
    }

    #[test]
    fn test_size_args_pair() {
        assert_eq!(
            SizeArgs::parse("8..2"),
            Some(SizeArgs::Pair("8".to_string(), "2".to_string()))
        );
        assert_eq!(SizeArgs::parse(" 10 .. 4 ").unwrap().render(), "10, 4");
    }

    #[test]
    fn test_size_args_single_and_malformed() {
        assert_eq!(SizeArgs::parse("255"), Some(SizeArgs::Raw("255".to_string())));
        assert_eq!(SizeArgs::parse("1..2..3").unwrap().render(), "1..2..3");
        assert_eq!(SizeArgs::parse("8..").unwrap().render(), "8..");
        assert_eq!(SizeArgs::parse("   "), None);
    }
}
