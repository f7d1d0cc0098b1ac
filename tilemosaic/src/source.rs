//! Source identifiers for remote images.
//!
//! A [`SourceId`] is an opaque reference (in practice a URL) to one remote
//! image. A [`SourceSet`] expands a URL template over an inclusive id range
//! into the ordered identifier list the pipeline consumes.
//!
//! # Example
//!
//! ```
//! use tilemosaic::source::SourceSet;
//!
//! let set = SourceSet::new("https://img.example.com/{id}.jpeg", 1, 3).unwrap();
//! let ids = set.expand();
//! assert_eq!(ids.len(), 3);
//! assert_eq!(ids[0].as_str(), "https://img.example.com/1.jpeg");
//! ```

use std::fmt;

use thiserror::Error;

/// Placeholder replaced by the numeric id in a URL template.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Template used when no other source is configured.
pub const DEFAULT_URL_TEMPLATE: &str = "https://api.slingacademy.com/public/sample-photos/{id}.jpeg";

/// First id of the default range.
pub const DEFAULT_FIRST_ID: u32 = 1;

/// Last id (inclusive) of the default range.
pub const DEFAULT_LAST_ID: u32 = 132;

/// Opaque reference to a single remote image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    /// Wraps a URL as a source identifier.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL this identifier refers to.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for SourceId {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Errors raised when building a [`SourceSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceSetError {
    /// The template has no `{id}` placeholder.
    #[error("URL template '{0}' does not contain the {{id}} placeholder")]
    MissingPlaceholder(String),

    /// The id range is empty.
    #[error("Empty id range: first ({first}) is greater than last ({last})")]
    EmptyRange { first: u32, last: u32 },
}

/// URL template plus inclusive id range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    template: String,
    first: u32,
    last: u32,
}

impl SourceSet {
    /// Creates a source set, validating the template and range.
    pub fn new(template: impl Into<String>, first: u32, last: u32) -> Result<Self, SourceSetError> {
        let template = template.into();
        if !template.contains(ID_PLACEHOLDER) {
            return Err(SourceSetError::MissingPlaceholder(template));
        }
        if first > last {
            return Err(SourceSetError::EmptyRange { first, last });
        }
        Ok(Self {
            template,
            first,
            last,
        })
    }

    /// The URL template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// First id of the range.
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Last id of the range (inclusive).
    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of identifiers the set expands to.
    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    /// Always false; construction rejects empty ranges.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Builds the identifier for a single id.
    pub fn source_for(&self, id: u32) -> SourceId {
        SourceId(self.template.replace(ID_PLACEHOLDER, &id.to_string()))
    }

    /// Expands the set into ordered identifiers, `first` to `last`.
    pub fn expand(&self) -> Vec<SourceId> {
        (self.first..=self.last)
            .map(|id| self.source_for(id))
            .collect()
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self {
            template: DEFAULT_URL_TEMPLATE.to_string(),
            first: DEFAULT_FIRST_ID,
            last: DEFAULT_LAST_ID,
        }
    }
}
