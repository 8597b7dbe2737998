use std::fmt::{self, Display};
use std::str::FromStr;

use bioflat_core::ParseError;

/// The `Type=` tag of an INFO or FORMAT declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
    Character,
    Flag,
}

impl FromStr for ValueType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ValueType::String),
            "Integer" => Ok(ValueType::Integer),
            "Float" => Ok(ValueType::Float),
            "Character" => Ok(ValueType::Character),
            "Flag" => Ok(ValueType::Flag),
            _ => Err(ParseError::InvalidField {
                field: "Type",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::String => "String",
            ValueType::Integer => "Integer",
            ValueType::Float => "Float",
            ValueType::Character => "Character",
            ValueType::Flag => "Flag",
        };
        write!(f, "{}", s)
    }
}

///
/// The `Number=` tag of an INFO or FORMAT declaration: how many values the
/// field carries.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Number {
    Count(usize),
    /// One value per alternate allele.
    A,
    /// One value per possible genotype.
    G,
    /// One value per allele, reference included.
    R,
    /// `.`, or anything else that is not a count.
    #[default]
    Unknown,
}

impl Number {
    /// Only `Number=1` fields decode to a single value.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Number::Count(1))
    }
}

impl From<&str> for Number {
    /// Counts must be written canonically: `01` or `+1` are not counts.
    fn from(s: &str) -> Self {
        match s {
            "A" => Number::A,
            "G" => Number::G,
            "R" => Number::R,
            _ if is_canonical_count(s) => s.parse::<usize>().map(Number::Count).unwrap_or(Number::Unknown),
            _ => Number::Unknown,
        }
    }
}

fn is_canonical_count(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Count(n) => write!(f, "{}", n),
            Number::A => write!(f, "A"),
            Number::G => write!(f, "G"),
            Number::R => write!(f, "R"),
            Number::Unknown => write!(f, "."),
        }
    }
}

///
/// A decoded INFO or FORMAT value.
///
/// Which variant a field decodes to is fixed by its declaration: the
/// [`ValueType`] picks the element type and [`Number`] picks scalar or vector.
/// `Flag` is always a scalar presence marker.
///
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    StringVector(Vec<String>),
    Integer(i64),
    IntegerVector(Vec<i64>),
    Float(f64),
    FloatVector(Vec<f64>),
    Character(char),
    CharacterVector(Vec<char>),
    Flag(bool),
}

impl TypedValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::String(_) | TypedValue::StringVector(_) => ValueType::String,
            TypedValue::Integer(_) | TypedValue::IntegerVector(_) => ValueType::Integer,
            TypedValue::Float(_) | TypedValue::FloatVector(_) => ValueType::Float,
            TypedValue::Character(_) | TypedValue::CharacterVector(_) => ValueType::Character,
            TypedValue::Flag(_) => ValueType::Flag,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            TypedValue::StringVector(_)
                | TypedValue::IntegerVector(_)
                | TypedValue::FloatVector(_)
                | TypedValue::CharacterVector(_)
        )
    }

    /// Number of values carried; 1 for every scalar.
    pub fn len(&self) -> usize {
        match self {
            TypedValue::StringVector(v) => v.len(),
            TypedValue::IntegerVector(v) => v.len(),
            TypedValue::FloatVector(v) => v.len(),
            TypedValue::CharacterVector(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TypedValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

impl Display for TypedValue {
    /// Values are written back in VCF form, vectors joined by `,`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => write!(f, "{}", s),
            TypedValue::StringVector(v) => write!(f, "{}", v.join(",")),
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::IntegerVector(v) => write!(f, "{}", join(v)),
            TypedValue::Float(x) => write!(f, "{}", x),
            TypedValue::FloatVector(v) => write!(f, "{}", join(v)),
            TypedValue::Character(c) => write!(f, "{}", c),
            TypedValue::CharacterVector(v) => write!(f, "{}", join(v)),
            TypedValue::Flag(_) => Ok(()),
        }
    }
}
