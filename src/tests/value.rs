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
use crate::value::*;

crate::value_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Eq, PartialEq)]
    enum Choice { abc, def, ghi }
}

fn choices() -> ArgType {
    ArgType::Enum(
        Choice::variants()
            .iter()
            .map(|v| (*v).to_owned())
            .collect(),
    )
}

#[test]
fn test_coerce_signed() {
    let i8_type = ArgType::Int { bits: 8 };
    assert_eq!(Value::Int(-128), coerce("-128", &i8_type).unwrap());
    assert_eq!(Value::Int(127), coerce("127", &i8_type).unwrap());
    assert_eq!(
        ParseError::NumericOverflow("128".to_owned()),
        coerce("128", &i8_type).unwrap_err()
    );
    assert_eq!(
        ParseError::NumericOverflow("-129".to_owned()),
        coerce("-129", &i8_type).unwrap_err()
    );

    let i64_type = ArgType::Int { bits: 64 };
    assert_eq!(Value::Int(i64::MIN), coerce("-9223372036854775808", &i64_type).unwrap());
    assert_eq!(
        ParseError::NumericOverflow("9223372036854775808".to_owned()),
        coerce("9223372036854775808", &i64_type).unwrap_err()
    );
    assert_eq!(
        ParseError::NumericOverflow("1000000000000000000000000000000000000000000".to_owned()),
        coerce("1000000000000000000000000000000000000000000", &i64_type).unwrap_err()
    );
}

#[test]
fn test_coerce_unsigned() {
    let u16_type = ArgType::UInt { bits: 16 };
    assert_eq!(Value::UInt(65535), coerce("65535", &u16_type).unwrap());
    assert_eq!(Value::UInt(0), coerce("0", &u16_type).unwrap());
    assert_eq!(
        ParseError::NumericOverflow("65536".to_owned()),
        coerce("65536", &u16_type).unwrap_err()
    );
    assert_eq!(
        ParseError::NumericOverflow("-1".to_owned()),
        coerce("-1", &u16_type).unwrap_err()
    );

    let u64_type = ArgType::UInt { bits: 64 };
    assert_eq!(
        Value::UInt(u64::MAX),
        coerce("18446744073709551615", &u64_type).unwrap()
    );
}

#[test]
fn test_coerce_invalid_numbers() {
    for bad in &["", "abc", "1.5", "0x10", "1e3", " 1"] {
        assert_eq!(
            ParseError::InvalidNumericLiteral((*bad).to_owned()),
            coerce(bad, &ArgType::Int { bits: 32 }).unwrap_err()
        );
        assert_eq!(
            ParseError::InvalidNumericLiteral((*bad).to_owned()),
            coerce(bad, &ArgType::UInt { bits: 32 }).unwrap_err()
        );
    }
    assert_eq!(
        ParseError::InvalidNumericLiteral("one".to_owned()),
        coerce("one", &ArgType::Float).unwrap_err()
    );
}

#[test]
fn test_coerce_float_and_str() {
    assert_eq!(Value::Float(1.5), coerce("1.5", &ArgType::Float).unwrap());
    assert_eq!(Value::Float(-2.0), coerce("-2", &ArgType::Float).unwrap());
    assert_eq!(Value::Float(2500.0), coerce("2.5e3", &ArgType::Float).unwrap());
    assert_eq!(
        Value::Str("--not-a-flag".to_owned()),
        coerce("--not-a-flag", &ArgType::Str).unwrap()
    );
}

#[test]
fn test_coerce_non_finite_float() {
    for bad in &["inf", "-inf", "infinity", "NaN", "nan"] {
        assert_eq!(
            ParseError::InvalidNumericLiteral((*bad).to_owned()),
            coerce(bad, &ArgType::Float).unwrap_err()
        );
    }
    assert_eq!(
        ParseError::NumericOverflow("1e400".to_owned()),
        coerce("1e400", &ArgType::Float).unwrap_err()
    );
}

#[test]
fn test_coerce_enum() {
    assert_eq!(
        Value::Enum {
            ordinal: 1,
            name: "def".to_owned(),
        },
        coerce("def", &choices()).unwrap()
    );
    assert_eq!(
        ParseError::UnknownEnumVariant {
            value: "DEF".to_owned(),
            choices: vec!["abc".to_owned(), "def".to_owned(), "ghi".to_owned()],
        },
        coerce("DEF", &choices()).unwrap_err()
    );
}

#[test]
fn test_value_enum_macro() {
    assert_eq!(&["abc", "def", "ghi"], Choice::variants());
    assert_eq!(Some(Choice::ghi), Choice::from_variant("ghi"));
    assert_eq!(None, Choice::from_variant("xyz"));
}

#[test]
fn test_from_value() {
    assert_eq!(Some(true), bool::from_value(&Value::Bool(true)));
    assert_eq!(Some(3u8), u8::from_value(&Value::UInt(3)));
    assert_eq!(Some(-3i16), i16::from_value(&Value::Int(-3)));
    assert_eq!(None, u8::from_value(&Value::Int(-3)));
    assert_eq!(None, u8::from_value(&Value::UInt(300)));
    assert_eq!(Some(2.5f32), f32::from_value(&Value::Float(2.5)));
    assert_eq!(None, f64::from_value(&Value::Int(2)));
    assert_eq!(
        Some("def".to_owned()),
        String::from_value(&Value::Enum {
            ordinal: 1,
            name: "def".to_owned(),
        })
    );
    assert_eq!(None, String::from_value(&Value::Bool(false)));
}

#[test]
fn test_parse_bool() {
    assert_eq!(Some(true), parse_bool(" TrUe "));
    assert_eq!(Some(false), parse_bool("false"));
    assert_eq!(None, parse_bool("1"));
}
