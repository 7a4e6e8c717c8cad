//! Textual `#include`/`#define` expansion ahead of lexing.

use std::{
    collections::HashSet,
    fmt::Display,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::trace;


#[derive(Clone, Debug, Default)]
pub struct PreprocessorOptions {
    pub include_paths: Vec<PathBuf>,
}

pub enum PreprocessError {
    IncludeNotFound { name: String, from: Option<PathBuf> },
    Io { path: PathBuf, error: std::io::Error },
    InvalidMacro { name: String, error: regex::Error },
}

impl Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncludeNotFound { name, from } => match from {
                Some(from) => write!(
                    f,
                    "Include file not found: {} (included from {})",
                    name,
                    from.display()
                ),
                None => write!(f, "Include file not found: {}", name),
            },
            Self::Io { path, error } => write!(f, "Error reading {}: {}", path.display(), error),
            Self::InvalidMacro { name, error } => {
                write!(f, "Unable to substitute macro {}: {}", name, error)
            }
        }
    }
}

impl std::fmt::Debug for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct Preprocessor {
    options: PreprocessorOptions,
    macros: IndexMap<String, String>,
    // rebuilt whenever a macro is defined
    substitution: Option<Regex>,
    visited: HashSet<PathBuf>,
}

impl Preprocessor {
    pub fn new(options: PreprocessorOptions) -> Self {
        Self {
            options,
            macros: IndexMap::new(),
            substitution: None,
            visited: HashSet::new(),
        }
    }

    pub fn macros(&self) -> &IndexMap<String, String> {
        &self.macros
    }

    pub fn preprocess_file(&mut self, path: &Path) -> Result<String, PreprocessError> {
        let _span = trace::span_auto!(
            trace::Level::DEBUG,
            "Preprocess",
            path = %path.display()
        );

        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !self.visited.insert(key) {
            trace::debug!("{} already included, skipping", path.display());
            return Ok(String::new());
        }

        let text = std::fs::read_to_string(path).map_err(|error| PreprocessError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        self.preprocess_str(&text, Some(path))
    }

    /// Expand `text`; `origin` is the file it came from, if any, and anchors relative includes
    pub fn preprocess_str(
        &mut self,
        text: &str,
        origin: Option<&Path>,
    ) -> Result<String, PreprocessError> {
        let mut output = Vec::new();

        for line in text.lines() {
            let line = line.trim_end();
            let stripped = line.trim_start();

            if stripped.starts_with("#include") {
                if let Some(name) = include_target(stripped) {
                    let name = name.to_string();
                    let resolved = self.find_include(&name, origin).ok_or_else(|| {
                        PreprocessError::IncludeNotFound {
                            name: name.clone(),
                            from: origin.map(Path::to_path_buf),
                        }
                    })?;
                    trace::trace!("#include \"{}\" -> {}", name, resolved.display());
                    output.push(self.preprocess_file(&resolved)?);
                }
                continue;
            }

            if line.starts_with("#define") {
                if let Some((name, value)) = define_parts(line) {
                    self.define(name, value)?;
                }
                continue;
            }

            output.push(self.substitute(line));
        }

        Ok(output.join("\n"))
    }

    fn define(&mut self, name: &str, value: &str) -> Result<(), PreprocessError> {
        trace::debug!("#define {} {}", name, value);
        self.macros.insert(name.to_string(), value.to_string());

        let alternatives: Vec<String> = self.macros.keys().map(|key| regex::escape(key)).collect();
        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        self.substitution =
            Some(
                Regex::new(&pattern).map_err(|error| PreprocessError::InvalidMacro {
                    name: name.to_string(),
                    error,
                })?,
            );
        Ok(())
    }

    // every macro is replaced in one pass; replacement text is not rescanned
    fn substitute(&self, line: &str) -> String {
        match &self.substitution {
            Some(pattern) => pattern
                .replace_all(line, |captures: &Captures| {
                    self.macros
                        .get(&captures[0])
                        .cloned()
                        .unwrap_or_else(|| captures[0].to_string())
                })
                .into_owned(),
            None => line.to_string(),
        }
    }

    fn find_include(&self, name: &str, origin: Option<&Path>) -> Option<PathBuf> {
        let including_dir = origin.and_then(Path::parent).map(Path::to_path_buf);

        self.options
            .include_paths
            .iter()
            .cloned()
            .chain(including_dir)
            .chain(std::iter::once(PathBuf::from(".")))
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

// `#include "name"`, anything else after the directive is ignored
fn include_target(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#include")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let quoted = rest.trim_start().strip_prefix('"')?;
    let (name, _) = quoted.split_once('"')?;
    (!name.is_empty()).then_some(name)
}

// `#define NAME VALUE`; lines with fewer parts define nothing
fn define_parts(line: &str) -> Option<(&str, &str)> {
    let (_, rest) = line.split_once(char::is_whitespace)?;
    let (name, value) = rest.trim_start().split_once(char::is_whitespace)?;
    let value = value.trim();
    (!value.is_empty()).then_some((name, value))
}
