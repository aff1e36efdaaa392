//! Links and relation sets

use crate::types::JsonObject;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// A named navigable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Relation name (e.g. "next")
    pub rel: String,
    /// Target URL, absolute when a base was available
    pub href: String,
}

impl Link {
    /// Create a link
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Relation name → link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Relations(BTreeMap<String, Link>);

impl Relations {
    /// Empty relation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Relations from an RFC 5988 `Link` header.
    ///
    /// Relative targets are resolved against `base` when given.
    pub fn from_link_header(header: &str, base: Option<&Url>) -> Self {
        let mut rels = Self::new();
        for (href, rel) in parse_link_header(header) {
            rels.insert(Link::new(rel, resolve(&href, base)));
        }
        rels
    }

    /// Relations from `*_url` fields of a resource body.
    ///
    /// `foo_url` becomes relation `foo`; a bare `url` field becomes `self`.
    pub fn from_fields(fields: &JsonObject, base: Option<&Url>) -> Self {
        let mut rels = Self::new();
        for (key, value) in fields {
            let Value::String(href) = value else {
                continue;
            };
            let rel = if key == "url" {
                "self"
            } else if let Some(name) = key.strip_suffix("_url") {
                if name.is_empty() {
                    continue;
                }
                name
            } else {
                continue;
            };
            rels.insert(Link::new(rel, resolve(href, base)));
        }
        rels
    }

    /// Insert (or replace) a link under its relation name
    pub fn insert(&mut self, link: Link) {
        self.0.insert(link.rel.clone(), link);
    }

    /// Link for a relation
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    /// Whether a relation is present
    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Relation names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.values()
    }
}

/// Parse a `Link` header into `(href, rel)` pairs.
///
/// Format: `<url>; rel="next", <url>; rel="prev last"`. A link with
/// several space-separated relation names yields one pair per name.
pub fn parse_link_header(header: &str) -> Vec<(String, String)> {
    let mut links = Vec::new();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        let href = rest[start + 1..start + len].trim();
        let after = &rest[start + len + 1..];
        let params_end = after.find('<').unwrap_or(after.len());

        for segment in after[..params_end].split(';') {
            let segment = segment.trim().trim_end_matches(',').trim();
            if let Some(value) = segment.strip_prefix("rel=") {
                let value = value.trim_matches('"').trim_matches('\'');
                for rel in value.split_whitespace() {
                    links.push((href.to_string(), rel.to_string()));
                }
            }
        }

        rest = &after[params_end..];
    }

    links
}

fn resolve(href: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => base
            .join(href)
            .map_or_else(|_| href.to_string(), |u| u.to_string()),
        None => href.to_string(),
    }
}
