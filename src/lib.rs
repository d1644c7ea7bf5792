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

#![deny(
    anonymous_parameters,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, unreachable_pub, unused_qualifications)]

//! argdecl is a declarative command-line argument parser. A program describes
//! its arguments once, as an ordered list of fields whose names encode their
//! roles (see `decode`), and argdecl builds an immutable Schema which parses
//! any number of argument lists into typed values.
//!
//! ```
//! use argdecl::{Field, Outcome, Schema};
//!
//! let schema = Schema::builder()
//!     .field(Field::meta("__program", "frob"))
//!     .field(Field::of::<bool>("_verbose", "Print more output"))
//!     .field(Field::of::<u32>("_jobs", "Parallel jobs").default("1"))
//!     .field(Field::of::<String>("FILE:+", "Files to frob"))
//!     .build()
//!     .unwrap();
//!
//! match schema.parse(&["-v", "--jobs", "4", "a.txt"]).unwrap() {
//!     Outcome::Parsed(result) => {
//!         assert!(result.get::<bool>("verbose").unwrap());
//!         assert_eq!(4, result.get::<u32>("jobs").unwrap());
//!         assert_eq!(vec!["a.txt".to_owned()], result.positionals_as::<String>().unwrap());
//!     }
//!     _ => unreachable!(),
//! }
//! ```

/// decode implements the field naming convention, turning field declarations
/// into ArgumentSpecs.
pub mod decode;
/// error defines the error types argdecl produces: schema errors, parse
/// errors, and errors reading values back out of a parse result.
pub mod error;
/// help renders help and version text for a Schema.
pub mod help;
/// logging provides a Logger implementation suitable for command-line
/// applications, configured from RUST_LOG.
#[cfg(feature = "logging")]
pub mod logging;
/// main_impl contains helpers for using argdecl from a program's main().
pub mod main_impl;
/// parse implements the parser itself, which matches arguments against a
/// Schema.
pub mod parse;
/// spec defines ArgumentSpec and Schema, the parser's description of a
/// program's arguments.
pub mod spec;
/// value defines typed values and the conversions between them and text.
pub mod value;

#[cfg(test)]
mod tests;

// Re-export most commonly used symbols, to allow using this library with just
// one "use".

pub use crate::decode::{Field, FieldType};
pub use crate::error::{Error, ParseError, Result, SchemaError, ValueError};
pub use crate::main_impl::main_impl;
pub use crate::parse::{Outcome, ParsedResult};
pub use crate::spec::{ArgumentSpec, MetaKind, Quantity, Role, Schema};
pub use crate::value::{ArgType, FromValue, Value, ValueEnum};
