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
use crate::parse::{parse, Outcome, ParsedResult};
use crate::spec::Schema;
use log::debug;
use std::env;
use std::fmt::{Debug, Display};
use std::io::Write;
use std::process;

/// The integer which is returned from main() if the program exits successfully.
pub const EXIT_SUCCESS: i32 = 0;
/// The integer which is returned from main() if the program exits with any
/// error.
pub const EXIT_FAILURE: i32 = 1;

/// Returns the current program's parameters (accessed essentially via
/// `std::env::args`) collected into a Vec. The 0'th parameter (the executable)
/// is omitted.
pub fn get_program_parameters() -> Vec<String> {
    env::args().skip(1).collect()
}

/// Parse the given arguments against the given Schema. If help or version
/// information was requested, it is written to `output_writer` (if any) and
/// None is returned; otherwise the parsed values are returned.
pub fn parse_and_emit<I, S, W>(
    schema: &Schema,
    args: I,
    mut output_writer: Option<W>,
) -> Result<Option<ParsedResult>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    let text = match parse(schema, args)? {
        Outcome::Parsed(result) => return Ok(Some(result)),
        Outcome::Help(text) => text,
        Outcome::Version(text) => text,
    };
    if let Some(f) = output_writer.as_mut() {
        f.write_all(text.as_bytes())?;
        f.flush()?;
    }
    Ok(None)
}

fn describe<E: Display + Debug>(e: &E) -> String {
    match cfg!(debug_assertions) {
        false => e.to_string(),
        true => format!("{:?}", e),
    }
}

/// This is a utility function which handles the result of `parse_and_emit`.
/// Parsed values are passed through. Otherwise, the exit code the process
/// should terminate with is returned: EXIT_SUCCESS if help or version text
/// was printed, or EXIT_FAILURE (after printing the error to stderr) if
/// parsing failed.
pub fn handle_result(r: Result<Option<ParsedResult>>) -> ::std::result::Result<ParsedResult, i32> {
    match r {
        Ok(Some(result)) => Ok(result),
        Ok(None) => Err(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error parsing command-line arguments: {}", describe(&e));
            Err(EXIT_FAILURE)
        }
    }
}

/// Parses this process' command-line arguments against the given Schema and
/// returns the parsed values.
///
/// If help or version information is requested, it is printed to stdout and
/// the process exits successfully. If parsing fails, the error is printed to
/// stderr and the process exits with EXIT_FAILURE. Like `std::process::exit`,
/// exiting this way runs no destructors.
pub fn main_impl(schema: &Schema) -> ParsedResult {
    match handle_result(parse_and_emit(
        schema,
        get_program_parameters(),
        Some(::std::io::stdout()),
    )) {
        Ok(result) => result,
        Err(code) => {
            debug!("Exiting with status {}", code);
            process::exit(code)
        }
    }
}
