//! Localized message lookup.
//!
//! Texts come from `.properties` bundles: one `key=value` pair per line,
//! `#` or `!` comment lines, `{0}`-style placeholders for arguments.

use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// MESSAGE KEYS
// ============================================================================

/// Message keys the validator itself looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Shown on a required field with no value.
    Required,
    /// Shown on a date field set after today.
    DateNotFuture,
}

impl MessageKey {
    /// Bundle key for this message.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "errRequired",
            Self::DateNotFuture => "errDateNotFuture",
        }
    }
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

/// Supplies localized texts by key.
///
/// Lookups are assumed to always resolve; implementations fall back to
/// something printable rather than failing.
pub trait MessageProvider {
    /// Returns the text for `key` with `{n}` placeholders replaced by `args[n]`.
    fn text(&self, key: &str, args: &[&str]) -> String;
}

impl<T> MessageProvider for &T
where
    T: MessageProvider + ?Sized,
{
    fn text(&self, key: &str, args: &[&str]) -> String {
        (**self).text(key, args)
    }
}

impl<T> MessageProvider for Arc<T>
where
    T: MessageProvider + ?Sized,
{
    fn text(&self, key: &str, args: &[&str]) -> String {
        (**self).text(key, args)
    }
}

// ============================================================================
// RESOURCE BUNDLE
// ============================================================================

const ENGLISH: &str = "\
# Validation messages
errRequired=This field is required
errDateNotFuture=The date cannot be in the future
";

/// A `.properties` message bundle with an optional fallback bundle.
///
/// Missing keys are looked up in the fallback; if that also misses, the key
/// itself is returned.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    texts: HashMap<String, String>,
    fallback: Option<Arc<ResourceBundle>>,
}

impl ResourceBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English texts for the validator's messages.
    #[must_use]
    pub fn english() -> Self {
        Self::from_properties(ENGLISH)
    }

    /// Parses `.properties` text.
    ///
    /// Keys and values are separated by the first `=` or `:`. Lines ending
    /// in a single backslash continue on the next line. `\n`, `\t`, `\\`
    /// and `\uXXXX` escapes are decoded in values.
    pub fn from_properties(source: &str) -> Self {
        let mut texts = HashMap::new();
        let mut pending = String::new();

        for raw in source.lines() {
            let line = raw.trim_start();
            if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
            {
                continue;
            }

            if let Some(continued) = strip_continuation(line) {
                pending.push_str(continued);
                continue;
            }
            pending.push_str(line);

            let entry = std::mem::take(&mut pending);
            if let Some((key, value)) = split_entry(&entry) {
                texts.insert(key.to_owned(), unescape(value));
            } else {
                tracing::debug!(line = %entry, "skipping malformed properties line");
            }
        }

        if !pending.is_empty()
            && let Some((key, value)) = split_entry(&pending)
        {
            texts.insert(key.to_owned(), unescape(value));
        }

        Self {
            texts,
            fallback: None,
        }
    }

    /// Uses `fallback` for keys this bundle does not define.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fallback(mut self, fallback: impl Into<Arc<ResourceBundle>>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Adds or replaces a text.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(key.into(), text.into());
    }

    /// Returns the raw text for `key`, consulting the fallback chain.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.texts
            .get(key)
            .map(String::as_str)
            .or_else(|| self.fallback.as_deref().and_then(|f| f.get(key)))
    }

    /// Returns `true` if `key` resolves in this bundle or its fallbacks.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys defined directly in this bundle.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns `true` if this bundle defines no keys of its own.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl MessageProvider for ResourceBundle {
    fn text(&self, key: &str, args: &[&str]) -> String {
        match self.get(key) {
            Some(template) => format_placeholders(template, args),
            None => {
                tracing::debug!(key, "message key not found in bundle");
                key.to_owned()
            }
        }
    }
}

fn strip_continuation(line: &str) -> Option<&str> {
    let trailing = line.len() - line.trim_end_matches('\\').len();
    (trailing % 2 == 1).then(|| &line[..line.len() - 1])
}

fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let idx = entry.find(['=', ':'])?;
    let key = entry[..idx].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, entry[idx + 1..].trim()))
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Replaces `{n}` placeholders with positional arguments.
///
/// Placeholders without a matching argument are left as written.
fn format_placeholders(template: &str, args: &[&str]) -> String {
    if args.is_empty() || !template.contains('{') {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let index: Option<usize> = after[..close].parse().ok();
        match index.and_then(|i| args.get(i)) {
            Some(arg) => out.push_str(arg),
            None => out.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
