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
use lazy_static::lazy_static;
use log::{LevelFilter, Log, Metadata, Record};
use regex::Regex;
use std::collections::HashMap;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;

/// The environment variable log filters are read from by `Options::from_env`.
pub const RUST_LOG_ENV_VAR: &str = "RUST_LOG";

/// Parse a LevelFilter from its (case-insensitive) name, e.g. "debug".
pub fn parse_log_level_filter(s: &str) -> Result<LevelFilter> {
    lazy_static! {
        static ref STRING_MAPPING: HashMap<String, LevelFilter> = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ]
        .iter()
        .map(|f| (f.to_string().to_lowercase(), *f))
        .collect();
    }

    STRING_MAPPING
        .get(&s.trim().to_lowercase())
        .cloned()
        .ok_or_else(|| Error::LogFilter(format!("invalid level '{}'", s)))
}

/// LogFilter sets the maximum enabled level for the modules matching a
/// pattern, or for every module if there is no pattern.
#[derive(Debug)]
pub struct LogFilter {
    /// Modules matching this regular expression (anchored at the start) are
    /// affected. None means all modules.
    pub module: Option<Regex>,
    /// The maximum enabled level for matching modules.
    pub level: LevelFilter,
}

impl LogFilter {
    /// The LevelFilter this filter applies to the given module, or None if it
    /// doesn't match.
    pub fn max_level_for(&self, module_path: &str) -> Option<LevelFilter> {
        match self.module {
            None => Some(self.level),
            Some(ref module) if module.is_match(module_path) => Some(self.level),
            Some(_) => None,
        }
    }
}

impl FromStr for LogFilter {
    type Err = Error;

    /// Parses either "level" or "module_regex=level".
    fn from_str(s: &str) -> Result<LogFilter> {
        Ok(match s.rsplit_once('=') {
            None => LogFilter {
                module: None,
                level: parse_log_level_filter(s)?,
            },
            Some((module, level)) => LogFilter {
                module: Some(Regex::new(&format!("^{}", module))?),
                level: parse_log_level_filter(level)?,
            },
        })
    }
}

/// LogFilters is a set of LogFilter, written as "filter;filter;...".
#[derive(Debug, Default)]
pub struct LogFilters(pub Vec<LogFilter>);

impl LogFilters {
    /// The LevelFilter for the given module: the most restrictive of all
    /// matching filters, or Warn if none match.
    pub fn max_level_for(&self, module_path: &str) -> LevelFilter {
        self.0
            .iter()
            .filter_map(|f| f.max_level_for(module_path))
            .min()
            .unwrap_or(LevelFilter::Warn)
    }

    /// The most verbose level any module may log at.
    pub fn max_level(&self) -> LevelFilter {
        self.0
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(LevelFilter::Warn)
    }
}

impl FromStr for LogFilters {
    type Err = Error;

    fn from_str(s: &str) -> Result<LogFilters> {
        let filters: Result<Vec<LogFilter>> = s
            .split(';')
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.parse())
            .collect();
        Ok(LogFilters(filters?))
    }
}

/// Options configures a Logger.
#[derive(Debug, Default)]
pub struct Options {
    /// Filters controlling which log statements are enabled.
    pub filters: LogFilters,
}

impl Options {
    /// Read filters from the RUST_LOG environment variable. If it isn't set,
    /// only warnings and errors are logged.
    pub fn from_env() -> Result<Options> {
        Ok(Options {
            filters: match ::std::env::var(RUST_LOG_ENV_VAR) {
                Ok(filters) => filters.parse()?,
                Err(::std::env::VarError::NotPresent) => LogFilters::default(),
                Err(::std::env::VarError::NotUnicode(_)) => {
                    return Err(Error::LogFilter(format!(
                        "{} is not valid unicode",
                        RUST_LOG_ENV_VAR
                    )))
                }
            },
        })
    }
}

/// Format a log record as a single line, with a UTC timestamp.
pub fn format_log_record(record: &Record) -> String {
    format!(
        "[{} {} {}] {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        record.level(),
        record.module_path().unwrap_or("UNKNOWN_MODULE"),
        record.args()
    )
}

/// Logger is a log::Log implementation which writes one line per record,
/// to stderr by default. Output failures are ignored.
pub struct Logger {
    options: Options,
    output: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Construct a Logger which writes to stderr.
    pub fn new(options: Options) -> Self {
        Logger::with_output(options, Box::new(io::stderr()))
    }

    /// Construct a Logger which writes to the given output.
    pub fn with_output(options: Options, output: Box<dyn Write + Send>) -> Self {
        Logger {
            options,
            output: Mutex::new(output),
        }
    }
}

impl Log for Logger {
    /// Filters match against the record's target, which is its module path
    /// unless the log statement overrides it.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.options.filters.max_level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", format_log_record(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut output) = self.output.lock() {
            let _ = output.flush();
        }
    }
}

/// Install a Logger with the given Options as the global logger.
pub fn try_init(options: Options) -> Result<()> {
    let max_level = options.filters.max_level();
    log::set_boxed_logger(Box::new(Logger::new(options)))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Install a Logger configured from the RUST_LOG environment variable.
pub fn init_from_env() -> Result<()> {
    try_init(Options::from_env()?)
}
