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

//! Field names encode an argument's role with a small naming convention:
//!
//! - `__program`, `__version`, `__usage`, `__description`: program metadata.
//!   The field's default value is the metadata text.
//! - `NAME:*`, `NAME:+`, `NAME:3`: the positional argument, accepting any
//!   number, at least one, or exactly three values. The name must be all
//!   uppercase letters and underscores.
//! - `dry_run`: an optional argument with long form `--dry-run` and no short
//!   form. A single leading underscore, as in `_dry_run`, also gives it the
//!   short form `-d`.
//! - `_dry_run:n:dry`: the same, with the short form overridden to `-n` and
//!   the long form to `--dry`. Either override may be `-` to remove that
//!   form, or left empty to keep the default.

use crate::error::*;
use crate::spec::{ArgumentSpec, MetaKind, Quantity};
use crate::value::{coerce, parse_bool, ArgType, Value, ValueEnum};
use log::trace;

const MARKER: char = '_';
const META_PREFIX: &str = "__";
const SEPARATOR: char = ':';
const NO_FORM: &str = "-";

/// FieldType is the declared Rust type of a field, before it is mapped onto
/// the ArgType the parser works with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `&str`
    Str,
    /// `String`
    String,
    /// A closed enumeration, with its variant names in declaration order.
    Enum(Vec<String>),
    /// Any other type, by name. Declaring a field of this type is an error.
    Other(String),
}

impl FieldType {
    /// The FieldType of the given ValueEnum implementation.
    pub fn of_enum<E: ValueEnum>() -> FieldType {
        FieldType::Enum(E::variants().iter().map(|v| (*v).to_owned()).collect())
    }

    /// Map this declared type onto the ArgType the parser uses.
    pub fn arg_type(&self) -> SchemaResult<ArgType> {
        Ok(match self {
            FieldType::Bool => ArgType::Bool,
            FieldType::I8 => ArgType::Int { bits: 8 },
            FieldType::I16 => ArgType::Int { bits: 16 },
            FieldType::I32 => ArgType::Int { bits: 32 },
            FieldType::I64 => ArgType::Int { bits: 64 },
            FieldType::Isize => ArgType::Int { bits: isize::BITS },
            FieldType::U8 => ArgType::UInt { bits: 8 },
            FieldType::U16 => ArgType::UInt { bits: 16 },
            FieldType::U32 => ArgType::UInt { bits: 32 },
            FieldType::U64 => ArgType::UInt { bits: 64 },
            FieldType::Usize => ArgType::UInt { bits: usize::BITS },
            FieldType::F32 | FieldType::F64 => ArgType::Float,
            FieldType::Str | FieldType::String => ArgType::Str,
            FieldType::Enum(variants) => ArgType::Enum(variants.clone()),
            FieldType::Other(name) => return Err(SchemaError::UnsupportedType(name.clone())),
        })
    }

    fn is_string(&self) -> bool {
        match self {
            FieldType::Str | FieldType::String => true,
            _ => false,
        }
    }
}

/// DeclaredType maps a Rust type to its FieldType, so fields can be declared
/// with `Field::of::<T>`.
pub trait DeclaredType {
    /// The FieldType for Self.
    fn field_type() -> FieldType;
}

macro_rules! impl_declared_type {
    ($($t:ty => $ft:ident),*) => {
        $(
            impl DeclaredType for $t {
                fn field_type() -> FieldType {
                    FieldType::$ft
                }
            }
        )*
    };
}

impl_declared_type!(
    bool => Bool,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
    &str => Str, String => String
);

/// Field is one declared field of a schema: a name which encodes its role, a
/// type, help text, and an optional default value given as text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    name: String,
    field_type: FieldType,
    help: String,
    default_value: Option<String>,
}

impl Field {
    /// Declare a field with an explicit FieldType.
    pub fn new(name: &str, field_type: FieldType, help: &str) -> Field {
        Field {
            name: name.to_owned(),
            field_type,
            help: help.to_owned(),
            default_value: None,
        }
    }

    /// Declare a field whose type is the Rust type T.
    pub fn of<T: DeclaredType>(name: &str, help: &str) -> Field {
        Field::new(name, T::field_type(), help)
    }

    /// Declare a field whose type is the given ValueEnum.
    pub fn of_enum<E: ValueEnum>(name: &str, help: &str) -> Field {
        Field::new(name, FieldType::of_enum::<E>(), help)
    }

    /// Declare a metadata field, e.g. `Field::meta("__version", "1.0.0")`.
    pub fn meta(name: &str, text: &str) -> Field {
        Field::new(name, FieldType::String, "").default(text)
    }

    /// Set this field's default value. It is converted to the field's type
    /// when the schema is built.
    pub fn default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_owned());
        self
    }

    /// The declared (encoded) name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

fn decode_meta(field: &Field, suffix: &str) -> SchemaResult<ArgumentSpec> {
    let kind = MetaKind::from_name(suffix)
        .ok_or_else(|| SchemaError::UnsupportedMetaField(field.name.clone()))?;
    if !field.field_type.is_string() {
        return Err(SchemaError::InvalidMetaType(field.name.clone()));
    }
    match field.default_value {
        None => Err(SchemaError::MissingMetaValue(field.name.clone())),
        Some(ref text) => Ok(ArgumentSpec::meta(kind, text)),
    }
}

fn is_positional_head(head: &str) -> bool {
    head.chars().any(|c| c.is_ascii_uppercase())
        && head.chars().all(|c| c.is_ascii_uppercase() || c == MARKER)
}

fn decode_quantity(field: &Field, quantity: Option<&str>) -> SchemaResult<Quantity> {
    let malformed = || SchemaError::MalformedPositional(field.name.clone());
    match quantity {
        Some("*") => Ok(Quantity::ZeroOrMore),
        Some("+") => Ok(Quantity::AtLeastOne),
        Some(n) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => {
            n.parse::<usize>().map(Quantity::ExactlyN).map_err(|_| malformed())
        }
        _ => Err(malformed()),
    }
}

fn decode_positional(field: &Field, head: &str, rest: Option<&str>) -> SchemaResult<ArgumentSpec> {
    let quantity = decode_quantity(field, rest)?;
    if let Some(ref value) = field.default_value {
        return Err(SchemaError::InvalidDefault {
            name: head.to_owned(),
            value: value.clone(),
        });
    }
    Ok(ArgumentSpec::positional(
        head,
        field.field_type.arg_type()?,
        quantity,
        field.help.as_str(),
    ))
}

fn decode_short_override(
    field: &Field,
    segment: &str,
    default: Option<char>,
) -> SchemaResult<Option<char>> {
    if segment.is_empty() {
        return Ok(default);
    }
    if segment == NO_FORM {
        return Ok(None);
    }
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(Some(c)),
        _ => Err(SchemaError::MalformedOverride(field.name.clone())),
    }
}

fn decode_long_override(
    field: &Field,
    segment: Option<&str>,
    default: Option<String>,
) -> SchemaResult<Option<String>> {
    match segment {
        None | Some("") => Ok(default),
        Some(NO_FORM) => Ok(None),
        Some(l) if l.starts_with('-') => Err(SchemaError::MalformedOverride(field.name.clone())),
        Some(l) => Ok(Some(l.to_owned())),
    }
}

fn decode_default(field: &Field, name: &str, arg_type: &ArgType) -> SchemaResult<Option<Value>> {
    let text = match field.default_value {
        None => return Ok(None),
        Some(ref text) => text,
    };
    let invalid = || SchemaError::InvalidDefault {
        name: name.to_owned(),
        value: text.clone(),
    };
    let value = match arg_type {
        ArgType::Bool => Value::Bool(parse_bool(text).ok_or_else(invalid)?),
        _ => coerce(text, arg_type).map_err(|_| invalid())?,
    };
    Ok(Some(value))
}

fn decode_optional(field: &Field, head: &str, rest: Option<&str>) -> SchemaResult<ArgumentSpec> {
    let (marked, name) = match head.strip_prefix(MARKER) {
        Some(name) => (true, name),
        None => (false, head),
    };
    if name.is_empty() {
        return Err(SchemaError::EmptyName(field.name.clone()));
    }

    let mut short = if marked { name.chars().next() } else { None };
    let mut long = Some(name.replace(MARKER, "-"));
    if let Some(rest) = rest {
        let mut segments = rest.split(SEPARATOR);
        let short_segment = segments.next().unwrap_or("");
        let long_segment = segments.next();
        if segments.next().is_some() {
            return Err(SchemaError::MalformedOverride(field.name.clone()));
        }
        short = decode_short_override(field, short_segment, short)?;
        long = decode_long_override(field, long_segment, long)?;
    }

    let arg_type = field.field_type.arg_type()?;
    let default_value = decode_default(field, name, &arg_type)?;
    let spec = ArgumentSpec::option(name, arg_type, short, long.as_deref(), field.help.as_str())?;
    Ok(match default_value {
        None => spec,
        Some(v) => spec.with_default(v),
    })
}

/// Decode a single field declaration into the ArgumentSpec it describes,
/// following the naming convention documented on this module.
pub fn decode(field: &Field) -> SchemaResult<ArgumentSpec> {
    let spec = if let Some(suffix) = field.name.strip_prefix(META_PREFIX) {
        decode_meta(field, suffix)?
    } else {
        let (head, rest) = match field.name.split_once(SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (field.name.as_str(), None),
        };
        if is_positional_head(head) {
            decode_positional(field, head, rest)?
        } else {
            decode_optional(field, head, rest)?
        }
    };
    trace!("Decoded field '{}' as {:?}", field.name, spec.role());
    Ok(spec)
}
