use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// One `key:"value"` pair at the start of the remaining input
#[allow(clippy::expect_used)]
static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([A-Za-z_][A-Za-z0-9_.\-]*):"((?:[^"\\]|\\.)*)""#)
        .expect("tag pair regex should be valid")
});

/// A single struct-tag pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"{}\"", self.key, self.value)
    }
}

/// Parse a raw tag fragment such as `form:"name" vd:"len($)>0"`
///
/// Pairs are separated by whitespace. Returns the offending remainder when the
/// fragment is not a sequence of pairs.
pub fn parse_fragment(fragment: &str) -> Result<Vec<Tag>, String> {
    let mut tags = Vec::new();
    let mut rest = fragment.trim_start();
    while !rest.is_empty() {
        let caps = TAG_PAIR
            .captures(rest)
            .ok_or_else(|| format!("expected key:\"value\" at '{rest}'"))?;
        tags.push(Tag::new(&caps[1], &caps[2]));
        let consumed = caps.get(0).map_or(rest.len(), |m| m.end());
        let tail = &rest[consumed..];
        if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
            return Err(format!("missing separator before '{tail}'"));
        }
        rest = tail.trim_start();
    }
    Ok(tags)
}

/// Ordered tag set, rendered Go struct-tag style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag, handing it back if its key is already present
    pub fn push(&mut self, tag: Tag) -> Result<(), Tag> {
        if self.get(&tag.key).is_some() {
            return Err(tag);
        }
        self.0.push(tag);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs joined by a single space
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(Tag::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_multiple_pairs() {
        let tags = parse_fragment(r#"form:"name"   vd:"len($)>0""#).unwrap();
        assert_eq!(tags, vec![Tag::new("form", "name"), Tag::new("vd", "len($)>0")]);
    }

    #[test]
    fn test_parse_escaped_quote() {
        let tags = parse_fragment(r#"vd:"regexp('\"x\"')""#).unwrap();
        assert_eq!(tags[0].value, r#"regexp('\"x\"')"#);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_fragment("form").is_err());
        assert!(parse_fragment(r#"form:"a"query:"b""#).is_err());
        assert!(parse_fragment(r#"form:"a" 42"#).is_err());
        assert!(parse_fragment("   ").unwrap().is_empty());
    }

    #[test]
    fn test_tag_set_render_and_duplicates() {
        let mut set = TagSet::new();
        set.push(Tag::new("json", "id")).unwrap();
        set.push(Tag::new("query", "id")).unwrap();
        let dup = set.push(Tag::new("json", "other")).unwrap_err();
        assert_eq!(dup.key, "json");
        assert_eq!(set.render(), r#"json:"id" query:"id""#);
        assert_eq!(set.get("query"), Some("id"));
    }
}
