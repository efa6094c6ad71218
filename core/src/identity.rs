//! Flag identity: one option's long name and optional short alias.
//!
//! A [`FlagIdentity`] is an immutable value. Construction checks the naming
//! convention (`--dash-separated-words` for long names, `-x` for short
//! names) so a malformed entry in a flag table is caught when the table is
//! built rather than when a user happens to type the flag.

use std::fmt;

use serde::Serialize;

use crate::error::{RegistryError, Result};

/// The name surface of a single command-line flag.
///
/// # Examples
///
/// ```
/// use flag_registry_core::FlagIdentity;
///
/// let working_dir = FlagIdentity::new("--working-dir", Some("-w")).unwrap();
/// assert_eq!(working_dir.accepted_names(), vec!["-w", "--working-dir"]);
/// assert!(working_dir.matches("-w"));
/// assert!(!working_dir.matches("--WORKING-DIR"));
/// assert_eq!(working_dir.to_string(), "-w, --working-dir");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlagIdentity {
    long: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short: Option<String>,
}

impl FlagIdentity {
    /// Creates a flag identity from a long name and an optional short alias.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidFlagDefinition`] when the long name is
    /// empty, when the short name equals the long name, or when either
    /// spelling breaks the dash conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_registry_core::{FlagIdentity, RegistryError};
    ///
    /// let no_cache = FlagIdentity::new("--no-cache", None).unwrap();
    /// assert_eq!(no_cache.accepted_names(), vec!["--no-cache"]);
    ///
    /// let err = FlagIdentity::new("", Some("-x")).unwrap_err();
    /// assert!(matches!(err, RegistryError::InvalidFlagDefinition { .. }));
    /// ```
    pub fn new(long: &str, short: Option<&str>) -> Result<Self> {
        let invalid = |reason: &str| RegistryError::InvalidFlagDefinition {
            long: long.to_string(),
            short: short.map(String::from),
            reason: reason.to_string(),
            key: None,
            catalog: None,
        };

        if long.is_empty() {
            return Err(invalid("long name is empty"));
        }
        if short == Some(long) {
            return Err(invalid("short name equals long name"));
        }
        if !is_long_spelling(long) {
            return Err(invalid(
                "long name must be `--` followed by a name without spaces or `=`",
            ));
        }
        if let Some(short) = short {
            if !is_short_spelling(short) {
                return Err(invalid("short name must be `-` followed by one letter or digit"));
            }
        }

        Ok(Self {
            long: long.to_string(),
            short: short.map(String::from),
        })
    }

    /// Long spelling, e.g. `--output-path`.
    pub fn long_name(&self) -> &str {
        &self.long
    }

    /// Short spelling, e.g. `-o`, if the flag has one.
    pub fn short_name(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Every spelling that refers to this flag: the short name first (when
    /// present), then the long name.
    pub fn accepted_names(&self) -> Vec<&str> {
        self.short
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.long.as_str()))
            .collect()
    }

    /// Returns `true` iff `token` is exactly the long or the short name.
    ///
    /// Matching is case-sensitive and never splits `--flag=value`; the
    /// tokenizer does that before calling in.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_registry_core::FlagIdentity;
    ///
    /// let flag = FlagIdentity::new("--working-dir", Some("-w")).unwrap();
    /// assert!(flag.matches("--working-dir"));
    /// assert!(!flag.matches("-working-dir"));
    /// assert!(!flag.matches("--working"));
    /// assert!(!flag.matches("--working-dir=/tmp"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        self.long == token || self.short.as_deref() == Some(token)
    }
}

/// Renders the help-style usage form: `-o, --output-path` or `--no-cache`.
impl fmt::Display for FlagIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.short {
            Some(short) => write!(f, "{short}, {}", self.long),
            None => f.write_str(&self.long),
        }
    }
}

fn is_long_spelling(long: &str) -> bool {
    let Some(name) = long.strip_prefix("--") else {
        return false;
    };
    !name.is_empty()
        && !name.starts_with('-')
        && !name.chars().any(|c| c == '=' || c.is_whitespace())
}

fn is_short_spelling(short: &str) -> bool {
    let mut chars = short.chars();
    chars.next() == Some('-')
        && chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.next().is_none()
}
