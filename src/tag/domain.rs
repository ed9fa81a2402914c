//! Core tag domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty tag attached to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a tag name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTagName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTagName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a tag name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Validate a list of raw tags, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTagName] if any of the tags is empty.
    pub fn parse_all(raw_tags: &[String]) -> Result<Vec<Self>, Error> {
        raw_tags.iter().map(|tag| Self::new(tag)).collect()
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::new(s)
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request body for replacing the tags on a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagsData {
    /// The new tags, replacing any existing ones.
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tag_name_tests {
    use crate::{Error, tag::TagName};

    #[test]
    fn new_fails_on_empty_string() {
        let tag_name = TagName::new("");

        assert_eq!(tag_name, Err(Error::EmptyTagName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let tag_name = TagName::new("\n\t \r");

        assert_eq!(tag_name, Err(Error::EmptyTagName));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let tag_name = TagName::new("🔥");

        assert!(tag_name.is_ok())
    }

    #[test]
    fn parse_all_keeps_order() {
        let raw = vec!["b".to_owned(), " a ".to_owned()];

        let tags = TagName::parse_all(&raw).unwrap();

        assert_eq!(
            tags,
            vec![TagName::new_unchecked("b"), TagName::new_unchecked("a")]
        );
    }

    #[test]
    fn parse_all_rejects_any_empty_tag() {
        let raw = vec!["ok".to_owned(), "".to_owned()];

        assert_eq!(TagName::parse_all(&raw), Err(Error::EmptyTagName));
    }
}
