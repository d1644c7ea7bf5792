// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::*;
use std::convert::TryFrom;
use std::fmt;

/// ArgType is the type of value an argument accepts. Integer types carry the
/// bit width of the Rust type they were declared with, so out-of-range values
/// can be rejected while parsing instead of when the caller reads them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgType {
    /// A flag, which is set purely by its presence.
    Bool,
    /// A signed integer of the given width.
    Int {
        /// The width in bits, at most 64.
        bits: u32,
    },
    /// An unsigned integer of the given width.
    UInt {
        /// The width in bits, at most 64.
        bits: u32,
    },
    /// A floating point number.
    Float,
    /// Arbitrary text.
    Str,
    /// One of a closed set of names, in declaration order.
    Enum(Vec<String>),
}

impl ArgType {
    /// The placeholder shown in help text for this type's value, or None for
    /// flags and enumerations (which list their choices instead).
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ArgType::Bool | ArgType::Enum(_) => None,
            ArgType::Int { .. } => Some("<int>"),
            ArgType::UInt { .. } => Some("<uint>"),
            ArgType::Float => Some("<float>"),
            ArgType::Str => Some("<str>"),
        }
    }
}

/// A Value is a single typed value, either parsed from a token or supplied as
/// a default.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A flag's state.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// Text, used verbatim.
    Str(String),
    /// A matched enumeration variant.
    Enum {
        /// The variant's position in the declared variant list.
        ordinal: usize,
        /// The variant's name.
        name: String,
    },
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
            Value::Enum { name, .. } => f.write_str(name),
        }
    }
}

fn signed_range(bits: u32) -> (i128, i128) {
    let max = (1i128 << (bits - 1)) - 1;
    (-max - 1, max)
}

fn unsigned_max(bits: u32) -> i128 {
    (1i128 << bits) - 1
}

fn parse_integer(token: &str, min: i128, max: i128) -> ParseResult<i128> {
    use std::num::IntErrorKind;

    let v = token.parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseError::NumericOverflow(token.to_owned())
        }
        _ => ParseError::InvalidNumericLiteral(token.to_owned()),
    })?;
    if v < min || v > max {
        return Err(ParseError::NumericOverflow(token.to_owned()));
    }
    Ok(v)
}

/// Floats must be base-10 literals: "inf" and "NaN" are rejected, and a
/// literal too large to represent is an overflow rather than infinity.
fn parse_float(token: &str) -> ParseResult<f64> {
    let is_literal = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    let v = match token.parse::<f64>() {
        Ok(v) if is_literal => v,
        _ => return Err(ParseError::InvalidNumericLiteral(token.to_owned())),
    };
    if !v.is_finite() {
        return Err(ParseError::NumericOverflow(token.to_owned()));
    }
    Ok(v)
}

/// Convert the given token into a Value of the given type.
///
/// Booleans are never read from text: a flag's presence is its value, so
/// coercing anything to Bool just yields true.
pub fn coerce(token: &str, arg_type: &ArgType) -> ParseResult<Value> {
    Ok(match arg_type {
        ArgType::Bool => Value::Bool(true),
        ArgType::Int { bits } => {
            let (min, max) = signed_range(*bits);
            Value::Int(parse_integer(token, min, max)? as i64)
        }
        ArgType::UInt { bits } => {
            Value::UInt(parse_integer(token, 0, unsigned_max(*bits))? as u64)
        }
        ArgType::Float => Value::Float(parse_float(token)?),
        ArgType::Str => Value::Str(token.to_owned()),
        ArgType::Enum(variants) => match variants.iter().position(|v| v == token) {
            Some(ordinal) => Value::Enum {
                ordinal,
                name: variants[ordinal].clone(),
            },
            None => {
                return Err(ParseError::UnknownEnumVariant {
                    value: token.to_owned(),
                    choices: variants.clone(),
                })
            }
        },
    })
}

/// Return the boolean interpretation of a string, or None if the string isn't
/// recognized as a valid boolean value.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_ref() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// ValueEnum is implemented by Rust enums which can be used as the value type
/// of an argument. Parsed values are matched by name against `variants`, and
/// turned back into Self with `from_variant`.
///
/// The `value_enum!` macro generates an implementation of this trait.
pub trait ValueEnum: Sized {
    /// The variant names, in declaration order. Names must be distinct.
    fn variants() -> &'static [&'static str];

    /// Construct the variant with the given name.
    fn from_variant(name: &str) -> Option<Self>;
}

/// Declare an enum whose variants can be parsed from the command line by
/// their exact (case-sensitive) names.
///
/// ```
/// argdecl::value_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Color { Red, Green, Blue }
/// }
///
/// use argdecl::ValueEnum;
/// assert_eq!(&["Red", "Green", "Blue"], Color::variants());
/// assert_eq!(Some(Color::Green), Color::from_variant("Green"));
/// ```
#[macro_export]
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant),+
        }

        impl $crate::ValueEnum for $name {
            fn variants() -> &'static [&'static str] {
                &[$(stringify!($variant)),+]
            }

            fn from_variant(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($variant) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }
    };
}

/// FromValue converts a stored Value into a concrete Rust type. It is the
/// read side of the coercion engine, used by `ParsedResult::get`.
pub trait FromValue: Sized {
    /// The name of the type, for error messages.
    const TYPE_NAME: &'static str;

    /// Convert the given Value, or return None if it can't be represented.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_for_integer {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_value(value: &Value) -> Option<Self> {
                    match *value {
                        Value::Int(v) => <$t>::try_from(v).ok(),
                        Value::UInt(v) => <$t>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value_for_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Enum { name, .. } => Some(name.clone()),
            _ => None,
        }
    }
}
