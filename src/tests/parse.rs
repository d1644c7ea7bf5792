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

use crate::decode::Field;
use crate::error::*;
use crate::parse::*;
use crate::spec::*;
use crate::value::*;

crate::value_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Eq, PartialEq)]
    enum Choice { abc, def, ghi }
}

fn build_schema(fields: Vec<Field>) -> Schema {
    fields
        .into_iter()
        .fold(Schema::builder(), |b, f| b.field(f))
        .build()
        .unwrap()
}

fn parse_ok(schema: &Schema, args: &[&str]) -> ParsedResult {
    match parse(schema, args).unwrap() {
        Outcome::Parsed(result) => result,
        other => panic!("Expected parsed values, got {:?}", other),
    }
}

fn parse_err(schema: &Schema, args: &[&str]) -> ParseError {
    parse(schema, args).unwrap_err()
}

fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::Str((*v).to_owned())).collect()
}

#[test]
fn test_long_option() {
    let schema = build_schema(vec![Field::of::<String>("format", "")]);
    let result = parse_ok(&schema, &["--format", "x"]);
    assert_eq!("x", result.get::<String>("format").unwrap());
    assert!(result.is_set("format"));
}

#[test]
fn test_short_option() {
    let schema = build_schema(vec![Field::of::<u32>("_verbosity", "")]);
    let result = parse_ok(&schema, &["-v", "3"]);
    assert_eq!(3, result.get::<u32>("verbosity").unwrap());
}

#[test]
fn test_value_may_look_like_a_flag() {
    let schema = build_schema(vec![
        Field::of::<String>("_pattern", ""),
        Field::of::<i32>("_offset", ""),
    ]);
    let result = parse_ok(&schema, &["--pattern", "--help", "-o", "-5"]);
    assert_eq!("--help", result.get::<String>("pattern").unwrap());
    assert_eq!(-5, result.get::<i32>("offset").unwrap());
}

#[test]
fn test_flag_cluster() {
    let schema = build_schema(vec![
        Field::of::<bool>("_all", ""),
        Field::of::<bool>("_long", ""),
        Field::of::<u8>("_width", ""),
    ]);
    let result = parse_ok(&schema, &["-alw", "80"]);
    assert!(result.get::<bool>("all").unwrap());
    assert!(result.get::<bool>("long").unwrap());
    assert_eq!(80, result.get::<u8>("width").unwrap());

    let result = parse_ok(&schema, &["-l"]);
    assert!(!result.get::<bool>("all").unwrap());
    assert!(!result.is_set("all"));
    assert!(result.get::<bool>("long").unwrap());
}

#[test]
fn test_non_final_value_flag() {
    let schema = build_schema(vec![
        Field::of::<u32>("_verbosity", ""),
        Field::of::<bool>("_silent", ""),
    ]);
    assert_eq!(
        ParseError::InvalidArgumentOrder(ArgumentOrder::NonFinalValueFlag {
            flag: 'v',
            cluster: "vs".to_owned(),
        }),
        parse_err(&schema, &["-vs"])
    );
}

#[test]
fn test_positionals() {
    let schema = build_schema(vec![
        Field::of::<bool>("_recursive", ""),
        Field::of::<String>("FILE:*", ""),
    ]);
    let result = parse_ok(&schema, &["file1", "file2"]);
    assert_eq!(strings(&["file1", "file2"]).as_slice(), result.positionals());
    assert_eq!(
        vec!["file1".to_owned(), "file2".to_owned()],
        result.positionals_as::<String>().unwrap()
    );

    let result = parse_ok(&schema, &["-r", "-", "file"]);
    assert!(result.get::<bool>("recursive").unwrap());
    assert_eq!(strings(&["-", "file"]), result.into_positionals().unwrap());

    let result = parse_ok(&schema, &[]);
    assert!(result.positionals().is_empty());
}

#[test]
fn test_option_after_positional() {
    let schema = build_schema(vec![
        Field::of::<bool>("_x", ""),
        Field::of::<String>("FILE:*", ""),
    ]);
    assert_eq!(
        ParseError::InvalidArgumentOrder(ArgumentOrder::OptionAfterPositional("-x".to_owned())),
        parse_err(&schema, &["file1", "-x"])
    );
    assert_eq!(
        ParseError::InvalidArgumentOrder(ArgumentOrder::OptionAfterPositional("-".to_owned())),
        parse_err(&schema, &["file1", "-"])
    );
}

#[test]
fn test_positional_quantities() {
    let schema = build_schema(vec![Field::of::<u8>("N:2", "")]);
    assert_eq!(
        ParseError::WrongNumberOfArguments {
            name: "N".to_owned(),
            expected: Quantity::ExactlyN(2),
            found: 1,
        },
        parse_err(&schema, &["1"])
    );
    assert_eq!(
        ParseError::WrongNumberOfArguments {
            name: "N".to_owned(),
            expected: Quantity::ExactlyN(2),
            found: 3,
        },
        parse_err(&schema, &["1", "2", "3"])
    );
    let result = parse_ok(&schema, &["1", "2"]);
    assert_eq!(vec![1u8, 2u8], result.positionals_as::<u8>().unwrap());

    let schema = build_schema(vec![Field::of::<String>("FILE:+", "")]);
    assert_eq!(
        ParseError::WrongNumberOfArguments {
            name: "FILE".to_owned(),
            expected: Quantity::AtLeastOne,
            found: 0,
        },
        parse_err(&schema, &[])
    );
}

#[test]
fn test_positional_coercion() {
    let schema = build_schema(vec![Field::of::<u8>("N:*", "")]);
    assert_eq!(
        ParseError::NumericOverflow("256".to_owned()),
        parse_err(&schema, &["1", "256", "x"])
    );
    assert_eq!(
        ParseError::InvalidNumericLiteral("x".to_owned()),
        parse_err(&schema, &["x", "256"])
    );
}

#[test]
fn test_enum_option() {
    let schema = build_schema(vec![Field::of_enum::<Choice>("choice", "")]);
    let result = parse_ok(&schema, &["--choice", "def"]);
    assert_eq!(
        Some(&Value::Enum {
            ordinal: 1,
            name: "def".to_owned(),
        }),
        result.value("choice")
    );
    assert_eq!(Choice::def, result.get_enum::<Choice>("choice").unwrap());

    match parse_err(&schema, &["--choice", "xyz"]) {
        ParseError::UnknownEnumVariant { value, .. } => assert_eq!("xyz", value),
        e => panic!("Unexpected error {:?}", e),
    }
}

#[test]
fn test_unknown_arguments() {
    let schema = build_schema(vec![Field::of::<bool>("_verbose", "")]);
    assert_eq!(
        ParseError::UnknownArgument("--verbos".to_owned()),
        parse_err(&schema, &["--verbos"])
    );
    assert_eq!(
        ParseError::UnknownArgument("-vq".to_owned()),
        parse_err(&schema, &["-vq"])
    );
    assert_eq!(
        ParseError::UnknownArgument("file".to_owned()),
        parse_err(&schema, &["file"])
    );
    assert_eq!(
        ParseError::UnknownArgument("--".to_owned()),
        parse_err(&schema, &["--"])
    );
}

#[test]
fn test_missing_value() {
    let schema = build_schema(vec![Field::of::<String>("_output", "")]);
    assert_eq!(
        ParseError::MissingValue("output".to_owned()),
        parse_err(&schema, &["-o"])
    );
}

#[test]
fn test_defaults() {
    let schema = build_schema(vec![
        Field::of::<u16>("_port", "").default("8080"),
        Field::of::<f64>("ratio", "").default("0.5"),
        Field::of::<String>("name", ""),
    ]);
    let result = parse_ok(&schema, &["--ratio", "2"]);
    assert_eq!(8080, result.get::<u16>("port").unwrap());
    assert!(!result.is_set("port"));
    assert_eq!(2.0, result.get::<f64>("ratio").unwrap());
    assert_eq!(
        ValueError::NoValue("name".to_owned()),
        result.get::<String>("name").unwrap_err()
    );
    assert_eq!(
        ValueError::TypeMismatch {
            name: "port".to_owned(),
            expected: "bool",
        },
        result.get::<bool>("port").unwrap_err()
    );
}

#[test]
fn test_last_value_wins() {
    let schema = build_schema(vec![Field::of::<String>("_name", "")]);
    let result = parse_ok(&schema, &["-n", "a", "--name", "b"]);
    assert_eq!("b", result.get::<String>("name").unwrap());
}

#[test]
fn test_help_short_circuits() {
    let schema = build_schema(vec![
        Field::meta("__version", "1.2.3"),
        Field::of::<u8>("_count", ""),
        Field::of::<u8>("N:1", ""),
    ]);
    match parse(&schema, &["--count", "oops", "--help"]) {
        Err(ParseError::InvalidNumericLiteral(_)) => {}
        other => panic!("Unexpected {:?}", other),
    }
    for args in [
        vec!["--help", "--count", "oops"],
        vec!["-h", "bad"],
        vec!["-ch"],
        vec!["7", "--help"],
        vec!["7", "8", "-h"],
    ]
    .iter()
    {
        match parse(&schema, args).unwrap() {
            Outcome::Help(text) => assert!(text.contains("--count")),
            other => panic!("Expected help for {:?}, got {:?}", args, other),
        }
    }
}

#[test]
fn test_version() {
    let schema = build_schema(vec![
        Field::meta("__version", "1.2.3"),
        Field::of::<bool>("_verbose", ""),
    ]);
    assert_eq!(
        Outcome::Version("1.2.3\n".to_owned()),
        parse(&schema, &["--version"]).unwrap()
    );
    assert_eq!(
        Outcome::Version("1.2.3\n".to_owned()),
        parse(&schema, &["-vV"]).unwrap()
    );
    // The first built-in in a cluster wins.
    match parse(&schema, &["-Vh"]).unwrap() {
        Outcome::Version(_) => {}
        other => panic!("Unexpected {:?}", other),
    }
}

#[test]
fn test_caller_supplied_buffer() {
    let schema = build_schema(vec![Field::of::<String>("FILE:*", "")]);
    let buffer = Vec::with_capacity(16);
    match parse_with_buffer(&schema, &["a", "b"], buffer).unwrap() {
        Outcome::Parsed(result) => {
            let positionals = result.into_positionals().unwrap();
            assert_eq!(strings(&["a", "b"]), positionals);
            assert!(positionals.capacity() >= 16);
        }
        other => panic!("Unexpected {:?}", other),
    }
}

#[test]
fn test_recycled_buffer() {
    let schema = build_schema(vec![Field::of::<String>("FILE:1", "")]);

    match parse_with_buffer(&schema, &["fresh"], strings(&["stale"])).unwrap() {
        Outcome::Parsed(result) => assert_eq!(strings(&["fresh"]), result.positionals()),
        other => panic!("Unexpected {:?}", other),
    }

    assert_eq!(
        ParseError::WrongNumberOfArguments {
            name: "FILE".to_owned(),
            expected: Quantity::ExactlyN(1),
            found: 0,
        },
        parse_with_buffer(&schema, Vec::<&str>::new(), strings(&["stale"])).unwrap_err()
    );
}

#[test]
fn test_schema_reuse() {
    let schema = build_schema(vec![Field::of::<bool>("_force", "")]);
    assert!(parse_ok(&schema, &["-f"]).get::<bool>("force").unwrap());
    assert!(!parse_ok(&schema, &[]).get::<bool>("force").unwrap());
    match schema.parse(vec!["--force".to_owned()]).unwrap() {
        Outcome::Parsed(result) => assert!(result.is_set("force")),
        other => panic!("Unexpected {:?}", other),
    }
}
