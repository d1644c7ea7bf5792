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

use crate::spec::{
    ArgumentSpec, Quantity, Schema, HELP_LONG, HELP_SHORT, VERSION_LONG, VERSION_SHORT,
};
use crate::value::ArgType;

/// Render the short and long forms of an option, plus its value placeholder.
/// Options without a short form are indented so long forms line up.
fn render_forms(short: Option<char>, long: Option<&str>, value_type: &ArgType) -> String {
    let mut s = match (short, long) {
        (Some(short), Some(long)) => format!("-{}, --{}", short, long),
        (Some(short), None) => format!("-{}", short),
        (None, Some(long)) => format!("    --{}", long),
        (None, None) => String::new(),
    };
    if let Some(placeholder) = value_type.placeholder() {
        s.push(' ');
        s.push_str(placeholder);
    }
    if let ArgType::Enum(variants) = value_type {
        s.push_str(&format!(" {{{}}}", variants.join("|")));
    }
    s
}

/// Render the usage placeholder for the positional argument, e.g. "FILE(2)",
/// "[FILE]..." or "FILE...".
pub(crate) fn render_positional(spec: &ArgumentSpec) -> String {
    match spec.quantity() {
        Some(Quantity::ExactlyN(n)) => format!("{}({})", spec.name(), n),
        Some(Quantity::ZeroOrMore) => format!("[{}]...", spec.name()),
        Some(Quantity::AtLeastOne) => format!("{}...", spec.name()),
        None => spec.name().to_owned(),
    }
}

fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Render the full help text for the given Schema: a header with the program
/// name and version, the description, a usage line, and one aligned line per
/// argument (including the built-in help and version flags).
pub fn render_help(schema: &Schema) -> String {
    let mut rows: Vec<(String, &str)> = vec![
        (
            render_forms(Some(HELP_SHORT), Some(HELP_LONG), &ArgType::Bool),
            "Print this help text and exit",
        ),
        (
            render_forms(Some(VERSION_SHORT), Some(VERSION_LONG), &ArgType::Bool),
            "Print version information and exit",
        ),
    ];
    for spec in schema.arguments() {
        let forms = match spec.is_positional() {
            true => render_positional(spec),
            false => render_forms(spec.short_form(), spec.long_form(), spec.value_type()),
        };
        rows.push((forms, spec.help()));
    }
    let width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<String> = Vec::new();
    let header = join_nonempty(&[schema.program(), schema.version()]);
    if !header.is_empty() {
        lines.push(header);
    }
    if !schema.description().is_empty() {
        lines.push(schema.description().to_owned());
    }
    let positional = schema.positional_spec().map(render_positional).unwrap_or_default();
    lines.push(join_nonempty(&[
        "Usage:",
        schema.program(),
        schema.usage(),
        positional.as_str(),
    ]));
    for (forms, help) in rows {
        let line = format!("  {:<width$}  {}", forms, help, width = width);
        lines.push(line.trim_end().to_owned());
    }

    let mut help = lines.join("\n");
    help.push('\n');
    help
}

/// Render the text printed for the built-in version flag.
pub fn render_version(schema: &Schema) -> String {
    format!("{}\n", schema.version())
}
