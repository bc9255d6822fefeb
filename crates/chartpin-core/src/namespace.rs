//! Namespace-scoped value overrides
//!
//! Charts that need to know which namespace they are installed into get two
//! groups of `--set` style pairs:
//!
//! - a feature tag `tags.ns-<namespace>=true` plus the camel-cased global
//!   flag `global.ns<Namespace>=true`
//! - the plain namespace as `global.ns=<namespace>`

use crate::error::Result;
use crate::values::{Values, parse_set_values};

/// Override pairs for one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceOverrides {
    /// Namespace tag and camel-cased global flag
    pub tags: Vec<String>,

    /// Simplified global namespace value
    pub global: Vec<String>,
}

impl NamespaceOverrides {
    /// All pairs, tags first
    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().chain(self.global.iter()).map(String::as_str)
    }

    /// The pairs as a values tree
    pub fn to_values(&self) -> Result<Values> {
        let pairs: Vec<&str> = self.pairs().collect();
        parse_set_values(&pairs)
    }
}

/// Build the override pairs for `namespace`
pub fn namespace_overrides(namespace: &str) -> NamespaceOverrides {
    NamespaceOverrides {
        tags: vec![
            format!("tags.ns-{}=true", namespace),
            format!("global.ns{}=true", to_camel_case(namespace)),
        ],
        global: vec![format!("global.ns={}", namespace)],
    }
}

/// Join `-`/`_` separated words, upper-casing the first letter of each
///
/// The rest of each word is left as is, so `prodEu-west` becomes
/// `ProdEuWest` and already camel-cased input is unchanged.
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in input.split(['-', '_']) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
