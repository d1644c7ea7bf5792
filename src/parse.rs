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
use crate::help;
use crate::spec::{ArgumentSpec, Schema, HELP_LONG, HELP_SHORT, VERSION_LONG, VERSION_SHORT};
use crate::value::{coerce, FromValue, Value, ValueEnum};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Mode is the parser's current state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    /// Expecting an option, a flag cluster, or the first positional value.
    MatchingArg,
    /// The previous token was an option which takes a value.
    AwaitingValue,
    /// Positional values have started; only more positional values may
    /// follow.
    CollectingPositional,
}

/// ParseState is the per-invocation parser state. It borrows the ArgumentSpec
/// it is waiting on a value for from the Schema.
#[derive(Debug)]
struct ParseState<'a> {
    mode: Mode,
    pending_spec: Option<&'a ArgumentSpec>,
}

impl<'a> ParseState<'a> {
    fn new() -> Self {
        ParseState {
            mode: Mode::MatchingArg,
            pending_spec: None,
        }
    }

    fn transition(&mut self, mode: Mode) {
        if self.mode != mode {
            trace!("Parser state {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Handle a matched optional argument: flags are set immediately, while
    /// anything else waits for the next token.
    fn matched(&mut self, spec: &'a ArgumentSpec, result: &mut ParsedResult) {
        if spec.is_boolean() {
            result.set(spec, Value::Bool(true));
        } else {
            self.pending_spec = Some(spec);
            self.transition(Mode::AwaitingValue);
        }
    }
}

/// The shape of a single command-line token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token<'t> {
    /// "--name", with the hyphens removed.
    Long(&'t str),
    /// "-abc", with the hyphen removed.
    Short(&'t str),
    /// Anything else, including "-" on its own.
    Bare(&'t str),
}

fn classify(token: &str) -> Token {
    if token.len() > 2 && token.starts_with("--") {
        Token::Long(&token[2..])
    } else if token.len() > 1 && token.starts_with('-') {
        Token::Short(&token[1..])
    } else {
        Token::Bare(token)
    }
}

/// The built-in flags, which are available in every Schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Builtin {
    Help,
    Version,
}

impl Builtin {
    fn from_token(token: Token) -> Option<Builtin> {
        match token {
            Token::Long(HELP_LONG) => Some(Builtin::Help),
            Token::Long(VERSION_LONG) => Some(Builtin::Version),
            Token::Short(cluster) => cluster.chars().find_map(|c| match c {
                HELP_SHORT => Some(Builtin::Help),
                VERSION_SHORT => Some(Builtin::Version),
                _ => None,
            }),
            _ => None,
        }
    }

    fn outcome(self, schema: &Schema) -> Outcome {
        debug!("Built-in {:?} requested", self);
        match self {
            Builtin::Help => Outcome::Help(help::render_help(schema)),
            Builtin::Version => Outcome::Version(help::render_version(schema)),
        }
    }
}

/// ParsedResult holds every argument's typed value after a successful parse,
/// keyed by argument name. Arguments which weren't given keep their default
/// values (flags default to false); arguments with no default and no given
/// value have no entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedResult {
    values: HashMap<String, Value>,
    explicit: HashSet<String>,
    positionals: Option<Vec<Value>>,
}

impl ParsedResult {
    fn new(schema: &Schema, mut buffer: Vec<Value>) -> Self {
        buffer.clear();
        ParsedResult {
            values: schema
                .arguments()
                .filter_map(|s| s.default_value().map(|v| (s.name().to_owned(), v)))
                .collect(),
            explicit: HashSet::new(),
            positionals: schema.positional_spec().map(|_| buffer),
        }
    }

    fn set(&mut self, spec: &ArgumentSpec, value: Value) {
        trace!("Setting '{}' to {:?}", spec.name(), value);
        self.explicit.insert(spec.name().to_owned());
        self.values.insert(spec.name().to_owned(), value);
    }

    fn push_positional(&mut self, spec: &ArgumentSpec, token: &str) -> ParseResult<()> {
        let value = coerce(token, spec.value_type())?;
        if let Some(positionals) = self.positionals.as_mut() {
            positionals.try_reserve(1)?;
            positionals.push(value);
        }
        Ok(())
    }

    /// Returns the raw Value for the given argument, if it has one.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if the given argument appeared on the command line, as
    /// opposed to holding its default value.
    pub fn is_set(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Returns the given argument's value, converted to T.
    pub fn get<T: FromValue>(&self, name: &str) -> ValueResult<T> {
        let value = self
            .value(name)
            .ok_or_else(|| ValueError::NoValue(name.to_owned()))?;
        T::from_value(value).ok_or_else(|| ValueError::TypeMismatch {
            name: name.to_owned(),
            expected: T::TYPE_NAME,
        })
    }

    /// Returns the given argument's value as the variant of E with the
    /// matched name.
    pub fn get_enum<E: ValueEnum>(&self, name: &str) -> ValueResult<E> {
        let mismatch = || ValueError::TypeMismatch {
            name: name.to_owned(),
            expected: std::any::type_name::<E>(),
        };
        match self.value(name) {
            None => Err(ValueError::NoValue(name.to_owned())),
            Some(Value::Enum { name: variant, .. }) => {
                E::from_variant(variant).ok_or_else(mismatch)
            }
            Some(_) => Err(mismatch()),
        }
    }

    /// The positional values, in order. This is empty if the Schema has no
    /// positional argument.
    pub fn positionals(&self) -> &[Value] {
        self.positionals.as_deref().unwrap_or(&[])
    }

    /// The positional values, each converted to T.
    pub fn positionals_as<T: FromValue>(&self) -> ValueResult<Vec<T>> {
        self.positionals()
            .iter()
            .map(|v| {
                T::from_value(v).ok_or_else(|| ValueError::TypeMismatch {
                    name: "positional".to_owned(),
                    expected: T::TYPE_NAME,
                })
            })
            .collect()
    }

    /// Take ownership of the positional value buffer. This is None if the
    /// Schema has no positional argument.
    pub fn into_positionals(self) -> Option<Vec<Value>> {
        self.positionals
    }
}

/// Outcome is the result of a successful parse. Requesting help or the
/// version short-circuits parsing, so no ParsedResult is produced in those
/// cases.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Every argument was parsed.
    Parsed(ParsedResult),
    /// The user asked for help; this is the rendered help text.
    Help(String),
    /// The user asked for the version; this is the version text.
    Version(String),
}

fn unknown(token: &str) -> ParseError {
    ParseError::UnknownArgument(token.to_owned())
}

fn non_final_value_flag(flag: char, cluster: &str) -> ParseError {
    ParseError::InvalidArgumentOrder(ArgumentOrder::NonFinalValueFlag {
        flag,
        cluster: cluster.to_owned(),
    })
}

/// Parse the given arguments (not including the program name) against the
/// given Schema. Positional values are accumulated in `buffer`, which is
/// returned inside the ParsedResult. Anything already in `buffer` is
/// discarded, but its capacity is kept.
///
/// The first error encountered aborts parsing; nothing after it is examined.
pub fn parse_with_buffer<I, S>(schema: &Schema, args: I, buffer: Vec<Value>) -> ParseResult<Outcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ParseState::new();
    let mut result = ParsedResult::new(schema, buffer);

    for arg in args {
        let arg = arg.as_ref();
        match state.mode {
            Mode::AwaitingValue => {
                if let Some(spec) = state.pending_spec.take() {
                    result.set(spec, coerce(arg, spec.value_type())?);
                }
                state.transition(Mode::MatchingArg);
            }
            Mode::MatchingArg => {
                let token = classify(arg);
                if let Some(builtin) = Builtin::from_token(token) {
                    return Ok(builtin.outcome(schema));
                }
                match token {
                    Token::Long(name) => {
                        let spec = schema.find_long(name).ok_or_else(|| unknown(arg))?;
                        state.matched(spec, &mut result);
                    }
                    Token::Short(cluster) => {
                        let last = cluster.chars().count() - 1;
                        for (idx, c) in cluster.chars().enumerate() {
                            let spec = schema.find_short(c).ok_or_else(|| unknown(arg))?;
                            if !spec.is_boolean() && idx != last {
                                return Err(non_final_value_flag(c, cluster));
                            }
                            state.matched(spec, &mut result);
                        }
                    }
                    Token::Bare(value) => {
                        let spec = schema.positional_spec().ok_or_else(|| unknown(arg))?;
                        result.push_positional(spec, value)?;
                        state.transition(Mode::CollectingPositional);
                    }
                }
            }
            Mode::CollectingPositional => {
                if let Some(builtin) = Builtin::from_token(classify(arg)) {
                    return Ok(builtin.outcome(schema));
                }
                if arg.starts_with('-') {
                    return Err(ParseError::InvalidArgumentOrder(
                        ArgumentOrder::OptionAfterPositional(arg.to_owned()),
                    ));
                }
                if let Some(spec) = schema.positional_spec() {
                    result.push_positional(spec, arg)?;
                }
            }
        }
    }

    if let Some(spec) = state.pending_spec {
        return Err(ParseError::MissingValue(spec.name().to_owned()));
    }
    if let Some(spec) = schema.positional_spec() {
        let found = result.positionals().len();
        if let Some(expected) = spec.quantity() {
            if !expected.accepts(found) {
                return Err(ParseError::WrongNumberOfArguments {
                    name: spec.name().to_owned(),
                    expected,
                    found,
                });
            }
        }
    }

    debug!(
        "Parsed {} argument(s) and {} positional value(s)",
        result.explicit.len(),
        result.positionals().len()
    );
    Ok(Outcome::Parsed(result))
}

/// Parse the given arguments (not including the program name) against the
/// given Schema.
pub fn parse<I, S>(schema: &Schema, args: I) -> ParseResult<Outcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with_buffer(schema, args, Vec::new())
}

impl Schema {
    /// Parse the given arguments against this Schema. See `parse::parse`.
    pub fn parse<I, S>(&self, args: I) -> ParseResult<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parse(self, args)
    }
}
