//! Token classification for the `resolve` command.
//!
//! A small tokenizer: `--name=value` is split at the
//! first `=`, `--` ends option processing, and short flags are never
//! clustered (`-wf` is one unknown option, not `-w -f`).

use flag_registry_core::FlagCatalog;
use serde::Serialize;

/// What a single argv token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenClass {
    /// A flag of the command's flag set.
    Flag {
        key: String,
        group: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Looks like an option but matches no flag.
    UnknownOption,
    /// Anything else, including everything after `--`.
    Positional,
    /// The `--` separator itself.
    Terminator,
}

/// A token together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    pub token: String,
    #[serde(flatten)]
    pub class: TokenClass,
}

pub fn classify(flags: &FlagCatalog, tokens: &[String]) -> Vec<TokenReport> {
    let mut options_ended = false;
    tokens
        .iter()
        .map(|token| {
            let class = if options_ended {
                TokenClass::Positional
            } else if token == "--" {
                options_ended = true;
                TokenClass::Terminator
            } else if token.starts_with("--") {
                let (name, value) = match token.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (token.as_str(), None),
                };
                flag_class(flags, name, value)
            } else if token.starts_with('-') && token.len() > 1 {
                flag_class(flags, token, None)
            } else {
                TokenClass::Positional
            };
            TokenReport {
                token: token.clone(),
                class,
            }
        })
        .collect()
}

fn flag_class(flags: &FlagCatalog, name: &str, value: Option<String>) -> TokenClass {
    match flags.resolve(name) {
        Some(entry) => TokenClass::Flag {
            key: entry.key().to_string(),
            group: entry.group().to_string(),
            value,
        },
        None => TokenClass::UnknownOption,
    }
}
