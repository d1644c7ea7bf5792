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

use crate::decode::{decode, Field};
use crate::error::*;
use crate::value::{ArgType, Value};
use log::debug;
use std::collections::HashSet;
use std::fmt;

/// The short form of the built-in help flag.
pub const HELP_SHORT: char = 'h';
/// The long form of the built-in help flag.
pub const HELP_LONG: &str = "help";
/// The short form of the built-in version flag.
pub const VERSION_SHORT: char = 'V';
/// The long form of the built-in version flag.
pub const VERSION_LONG: &str = "version";

/// Quantity is the number of values a positional argument accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Quantity {
    /// Exactly this many values.
    ExactlyN(usize),
    /// One or more values.
    AtLeastOne,
    /// Any number of values, including none.
    ZeroOrMore,
}

impl Quantity {
    /// Returns whether collecting `count` values satisfies this Quantity.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Quantity::ExactlyN(n) => count == n,
            Quantity::AtLeastOne => count >= 1,
            Quantity::ZeroOrMore => true,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Quantity::ExactlyN(n) => write!(f, "exactly {}", n),
            Quantity::AtLeastOne => f.write_str("at least 1"),
            Quantity::ZeroOrMore => f.write_str("any number of"),
        }
    }
}

/// MetaKind identifies which piece of program metadata a Meta spec carries.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetaKind {
    /// The program's name.
    Program,
    /// The program's version string.
    Version,
    /// Extra usage text, shown between the program name and the positional
    /// placeholder.
    Usage,
    /// A one-line description of the program.
    Description,
}

impl MetaKind {
    /// Look up a MetaKind by its lowercase field name.
    pub fn from_name(name: &str) -> Option<MetaKind> {
        match name {
            "program" => Some(MetaKind::Program),
            "version" => Some(MetaKind::Version),
            "usage" => Some(MetaKind::Usage),
            "description" => Some(MetaKind::Description),
            _ => None,
        }
    }

    /// The lowercase field name for this MetaKind.
    pub fn name(&self) -> &'static str {
        match *self {
            MetaKind::Program => "program",
            MetaKind::Version => "version",
            MetaKind::Usage => "usage",
            MetaKind::Description => "description",
        }
    }
}

/// Role is how an argument is identified on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    /// An argument identified by "-s" and/or "--long".
    OptionalArg {
        /// The single-character form, if any.
        short: Option<char>,
        /// The long form, if any.
        long: Option<String>,
    },
    /// Bare values, identified purely by position.
    Positional {
        /// How many values are accepted.
        quantity: Quantity,
    },
    /// Fixed program metadata, never matched against arguments.
    Meta {
        /// Which piece of metadata this is.
        kind: MetaKind,
        /// The metadata text.
        text: String,
    },
}

/// ArgumentSpec describes a single declared argument, in such a way that the
/// parser can identify it in the list of command-line arguments and convert
/// its value.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentSpec {
    name: String,
    value_type: ArgType,
    role: Role,
    help: String,
    default_value: Option<Value>,
}

impl ArgumentSpec {
    /// Constructs a spec for an optional argument which takes a value. At
    /// least one of `short` and `long` must be given.
    pub fn option(
        name: &str,
        value_type: ArgType,
        short: Option<char>,
        long: Option<&str>,
        help: &str,
    ) -> SchemaResult<ArgumentSpec> {
        if short.is_none() && long.is_none() {
            return Err(SchemaError::MissingForm(name.to_owned()));
        }
        Ok(ArgumentSpec {
            name: name.to_owned(),
            value_type,
            role: Role::OptionalArg {
                short,
                long: long.map(|l| l.to_owned()),
            },
            help: help.to_owned(),
            default_value: None,
        })
    }

    /// Constructs a spec for a boolean flag. Flags always have a value, which
    /// is false unless the flag is present.
    pub fn flag(
        name: &str,
        short: Option<char>,
        long: Option<&str>,
        help: &str,
    ) -> SchemaResult<ArgumentSpec> {
        ArgumentSpec::option(name, ArgType::Bool, short, long, help)
    }

    /// Constructs a spec for the positional argument.
    pub fn positional(
        name: &str,
        value_type: ArgType,
        quantity: Quantity,
        help: &str,
    ) -> ArgumentSpec {
        ArgumentSpec {
            name: name.to_owned(),
            value_type,
            role: Role::Positional { quantity },
            help: help.to_owned(),
            default_value: None,
        }
    }

    /// Constructs a spec carrying a piece of program metadata.
    pub fn meta(kind: MetaKind, text: &str) -> ArgumentSpec {
        ArgumentSpec {
            name: kind.name().to_owned(),
            value_type: ArgType::Str,
            role: Role::Meta {
                kind,
                text: text.to_owned(),
            },
            help: String::new(),
            default_value: None,
        }
    }

    /// Give this argument a default value, which it keeps if it doesn't
    /// appear on the command line.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// The argument's visible name, which is also the key its value is stored
    /// under after parsing.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The type of value this argument accepts.
    pub fn value_type(&self) -> &ArgType {
        &self.value_type
    }

    /// How this argument is identified on the command line.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// The human-readable help text for this argument.
    pub fn help(&self) -> &str {
        self.help.as_str()
    }

    /// The value this argument has if it isn't given. Flags implicitly
    /// default to false.
    pub fn default_value(&self) -> Option<Value> {
        match (&self.default_value, self.is_boolean()) {
            (Some(v), _) => Some(v.clone()),
            (None, true) => Some(Value::Bool(false)),
            (None, false) => None,
        }
    }

    /// This argument's short form, if it has one.
    pub fn short_form(&self) -> Option<char> {
        match self.role {
            Role::OptionalArg { short, .. } => short,
            _ => None,
        }
    }

    /// This argument's long form, if it has one.
    pub fn long_form(&self) -> Option<&str> {
        match self.role {
            Role::OptionalArg { ref long, .. } => long.as_ref().map(|l| l.as_str()),
            _ => None,
        }
    }

    /// The positional Quantity, if this is the positional argument.
    pub fn quantity(&self) -> Option<Quantity> {
        match self.role {
            Role::Positional { quantity } => Some(quantity),
            _ => None,
        }
    }

    /// Returns true if this is a boolean flag, which is set by presence
    /// instead of consuming a value.
    pub fn is_boolean(&self) -> bool {
        self.value_type == ArgType::Bool
    }

    /// Returns true if this argument is identified by "-s" or "--long".
    pub fn is_optional(&self) -> bool {
        match self.role {
            Role::OptionalArg { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this is the positional argument.
    pub fn is_positional(&self) -> bool {
        self.quantity().is_some()
    }

    /// Returns true if this spec only carries program metadata.
    pub fn is_meta(&self) -> bool {
        match self.role {
            Role::Meta { .. } => true,
            _ => false,
        }
    }
}

fn check_value_type(spec: &ArgumentSpec) -> SchemaResult<()> {
    match spec.value_type {
        ArgType::Int { bits } | ArgType::UInt { bits } if bits == 0 || bits > 64 => {
            Err(SchemaError::InvalidBitWidth {
                name: spec.name.clone(),
                bits,
            })
        }
        _ => Ok(()),
    }
}

fn check_optional_forms(
    spec: &ArgumentSpec,
    shorts: &mut HashSet<char>,
    longs: &mut HashSet<String>,
) -> SchemaResult<()> {
    let (short, long) = match spec.role {
        Role::OptionalArg {
            short,
            ref long,
        } => (short, long.as_ref()),
        _ => return Ok(()),
    };
    if short.is_none() && long.is_none() {
        return Err(SchemaError::MissingForm(spec.name.clone()));
    }
    if let Some(s) = short {
        if s == HELP_SHORT || s == VERSION_SHORT {
            return Err(SchemaError::ReservedForm(format!("-{}", s)));
        }
        if !shorts.insert(s) {
            return Err(SchemaError::DuplicateShortForm(s));
        }
    }
    if let Some(l) = long {
        if l == HELP_LONG || l == VERSION_LONG {
            return Err(SchemaError::ReservedForm(format!("--{}", l)));
        }
        if !longs.insert(l.clone()) {
            return Err(SchemaError::DuplicateLongForm(l.clone()));
        }
    }
    Ok(())
}

/// Schema is the complete, validated, immutable description of a program's
/// arguments: the ordered list of ArgumentSpecs (declaration order matters
/// for help output) plus the program metadata extracted from Meta specs.
///
/// A Schema is built once and may be shared freely; parsing never mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    specs: Vec<ArgumentSpec>,
    program: String,
    version: String,
    usage: String,
    description: String,
}

impl Schema {
    /// Construct a new Schema from the given complete list of ArgumentSpecs.
    ///
    /// This returns an error if the specs, taken together, are invalid: for
    /// example if more than one positional argument is declared, or if two
    /// arguments share a short form.
    pub fn new(specs: Vec<ArgumentSpec>) -> SchemaResult<Schema> {
        let mut names: HashSet<&str> = HashSet::new();
        let mut meta_kinds: HashSet<MetaKind> = HashSet::new();
        let mut shorts: HashSet<char> = HashSet::new();
        let mut longs: HashSet<String> = HashSet::new();
        let mut positional: Option<&ArgumentSpec> = None;

        for spec in &specs {
            if let Role::Meta { kind, .. } = spec.role {
                if !meta_kinds.insert(kind) {
                    return Err(SchemaError::DuplicateName(spec.name.clone()));
                }
                continue;
            }
            if !names.insert(spec.name()) {
                return Err(SchemaError::DuplicateName(spec.name.clone()));
            }
            check_value_type(spec)?;
            check_optional_forms(spec, &mut shorts, &mut longs)?;
            if spec.is_positional() {
                if let Some(first) = positional {
                    return Err(SchemaError::MultiplePositionals(
                        first.name.clone(),
                        spec.name.clone(),
                    ));
                }
                if spec.is_boolean() {
                    return Err(SchemaError::BooleanPositional(spec.name.clone()));
                }
                positional = Some(spec);
            }
        }

        let meta = |kind: MetaKind| -> String {
            specs
                .iter()
                .find_map(|s| match s.role {
                    Role::Meta { kind: k, ref text } if k == kind => Some(text.clone()),
                    _ => None,
                })
                .unwrap_or_default()
        };
        let schema = Schema {
            program: meta(MetaKind::Program),
            version: meta(MetaKind::Version),
            usage: meta(MetaKind::Usage),
            description: meta(MetaKind::Description),
            specs,
        };
        debug!(
            "Built schema for '{}' with {} argument(s)",
            schema.program,
            schema.arguments().count()
        );
        Ok(schema)
    }

    /// Start building a Schema from field declarations.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns an Iterator over every spec, metadata included, in
    /// declaration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ArgumentSpec> {
        self.specs.iter()
    }

    /// Returns an Iterator over the specs which are matched against
    /// arguments (that is, everything except metadata).
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.specs.iter().filter(|s| !s.is_meta())
    }

    /// The positional argument, if one was declared.
    pub fn positional_spec(&self) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.is_positional())
    }

    /// The program name, or "" if none was declared.
    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// The program version, or "" if none was declared.
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// The extra usage text, or "" if none was declared.
    pub fn usage(&self) -> &str {
        self.usage.as_str()
    }

    /// The program description, or "" if none was declared.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Locate the first optional argument with the given long form.
    pub(crate) fn find_long(&self, long: &str) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.long_form() == Some(long))
    }

    /// Locate the first optional argument with the given short form.
    pub(crate) fn find_short(&self, short: char) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.short_form() == Some(short))
    }
}

#[derive(Debug)]
enum Entry {
    Field(Field),
    Spec(ArgumentSpec),
}

/// SchemaBuilder collects field declarations and explicit specs in order,
/// and turns them into a Schema. Declarations are decoded and validated all
/// at once, in `build`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entries: Vec<Entry>,
}

impl SchemaBuilder {
    /// Add a field declaration, whose name encodes its role (see the `decode`
    /// module).
    pub fn field(mut self, field: Field) -> Self {
        self.entries.push(Entry::Field(field));
        self
    }

    /// Add an explicitly constructed spec.
    pub fn spec(mut self, spec: ArgumentSpec) -> Self {
        self.entries.push(Entry::Spec(spec));
        self
    }

    /// Decode every declaration and build the resulting Schema.
    pub fn build(self) -> SchemaResult<Schema> {
        let specs: SchemaResult<Vec<ArgumentSpec>> = self
            .entries
            .into_iter()
            .map(|e| match e {
                Entry::Field(f) => decode(&f),
                Entry::Spec(s) => Ok(s),
            })
            .collect();
        Schema::new(specs?)
    }
}
