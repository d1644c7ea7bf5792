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

use crate::spec::Quantity;
use std::collections::TryReserveError;
use thiserror::Error;

/// SchemaError describes a defect in a schema declaration. These are detected
/// once, when the schema is built, and indicate a programming error rather
/// than bad user input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SchemaError {
    /// A positional argument was declared with a boolean value type.
    #[error("Positional argument '{0}' cannot be boolean")]
    BooleanPositional(String),
    /// Two arguments share the same long form.
    #[error("Duplicate long form '--{0}'")]
    DuplicateLongForm(String),
    /// Two arguments (or two metadata fields) share the same visible name.
    #[error("Duplicate argument name '{0}'")]
    DuplicateName(String),
    /// Two arguments share the same short form.
    #[error("Duplicate short form '-{0}'")]
    DuplicateShortForm(char),
    /// A field was declared with an empty visible name.
    #[error("Field '{0}' has an empty name")]
    EmptyName(String),
    /// A field's declared default could not be converted to its value type.
    #[error("Invalid default value '{value}' for '{name}'")]
    InvalidDefault {
        /// The argument's visible name.
        name: String,
        /// The offending default value.
        value: String,
    },
    /// An integer argument was declared with a bit width outside 1..=64.
    #[error("Invalid integer width {bits} for '{name}'")]
    InvalidBitWidth {
        /// The argument's visible name.
        name: String,
        /// The declared width, in bits.
        bits: u32,
    },
    /// A metadata field was declared with a type other than a plain string.
    #[error("Metadata field '{0}' must be a string")]
    InvalidMetaType(String),
    /// The override segments of an optional argument's name are malformed.
    #[error("Malformed override in '{0}'")]
    MalformedOverride(String),
    /// A positional declaration has a missing or invalid quantity.
    #[error("Malformed positional declaration '{0}'")]
    MalformedPositional(String),
    /// A metadata field was declared without its fixed value.
    #[error("Metadata field '{0}' requires a value")]
    MissingMetaValue(String),
    /// Overrides removed both the short and the long form of an argument.
    #[error("Argument '{0}' has neither a short nor a long form")]
    MissingForm(String),
    /// More than one positional argument was declared.
    #[error("Only one positional argument may be declared (found '{0}' and '{1}')")]
    MultiplePositionals(String, String),
    /// An argument claims a form reserved for the built-in help and version
    /// flags.
    #[error("'{0}' is reserved for a built-in flag")]
    ReservedForm(String),
    /// A metadata field name other than program, version, usage or
    /// description.
    #[error("Unsupported metadata field '{0}'")]
    UnsupportedMetaField(String),
    /// A field was declared with a value type which can't be parsed from the
    /// command line.
    #[error("Unsupported field type '{0}'")]
    UnsupportedType(String),
}

/// A Result type which uses SchemaError.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// ArgumentOrder is the specific ordering rule an invalid token violated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgumentOrder {
    /// An option appeared after positional collection started.
    OptionAfterPositional(String),
    /// A value-taking short flag appeared before the end of a cluster.
    NonFinalValueFlag {
        /// The value-taking flag.
        flag: char,
        /// The cluster it appeared in, without the leading hyphen.
        cluster: String,
    },
}

impl std::fmt::Display for ArgumentOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ArgumentOrder::OptionAfterPositional(token) => {
                write!(f, "option '{}' after positional arguments", token)
            }
            ArgumentOrder::NonFinalValueFlag { flag, cluster } => write!(
                f,
                "flag '-{}' takes a value but is not last in '-{}'",
                flag, cluster
            ),
        }
    }
}

/// ParseError represents the various errors which can come up while parsing
/// a set of command-line arguments against a schema.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// Growing the positional value buffer failed.
    #[error("Failed to allocate positional arguments: {0}")]
    Allocation(#[from] TryReserveError),
    /// Tokens appeared in an order the grammar doesn't allow.
    #[error("Invalid argument order: {0}")]
    InvalidArgumentOrder(ArgumentOrder),
    /// A numeric value was not a valid literal.
    #[error("Invalid numeric value '{0}'")]
    InvalidNumericLiteral(String),
    /// A value-taking flag was the last token.
    #[error("Flag '{0}' provided without any value")]
    MissingValue(String),
    /// A numeric value doesn't fit its target type.
    #[error("Numeric value '{0}' is out of range")]
    NumericOverflow(String),
    /// A token didn't match any declared argument.
    #[error("Unknown argument '{0}'")]
    UnknownArgument(String),
    /// A value didn't match any of an enumeration's variants.
    #[error("Invalid value '{value}' (expected one of: {})", .choices.join(", "))]
    UnknownEnumVariant {
        /// The value as given.
        value: String,
        /// The accepted variant names.
        choices: Vec<String>,
    },
    /// The positional argument received a count its quantity doesn't allow.
    #[error("Expected {expected} value(s) for '{name}', found {found}")]
    WrongNumberOfArguments {
        /// The positional argument's name.
        name: String,
        /// The declared quantity.
        expected: Quantity,
        /// How many values were given.
        found: usize,
    },
}

/// A Result type which uses ParseError.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// ValueError is returned when reading a typed value out of a parse result
/// fails.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValueError {
    /// There is no value (parsed or default) for the named argument.
    #[error("No value for argument '{0}'")]
    NoValue(String),
    /// The stored value can't be represented as the requested type.
    #[error("Value of argument '{name}' is not a valid {expected}")]
    TypeMismatch {
        /// The argument's name.
        name: String,
        /// The requested Rust type.
        expected: &'static str,
    },
}

/// A Result type which uses ValueError.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

/// Error is the aggregate of every error argdecl can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error, generally encountered writing help or version text.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// An invalid logging filter.
    #[cfg(feature = "logging")]
    #[error("Invalid log filter: {0}")]
    LogFilter(String),
    /// Parsing the command-line arguments failed.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An error compiling a log filter's module pattern.
    #[cfg(feature = "logging")]
    #[error("{0}")]
    Regex(#[from] regex::Error),
    /// The schema declaration is invalid.
    #[error("{0}")]
    Schema(#[from] SchemaError),
    /// Installing the global logger failed.
    #[error("{0}")]
    SetLogger(#[from] log::SetLoggerError),
    /// Reading a typed value out of the parse result failed.
    #[error("{0}")]
    Value(#[from] ValueError),
}

/// A Result type which uses argdecl's aggregate Error type.
pub type Result<T> = std::result::Result<T, Error>;
