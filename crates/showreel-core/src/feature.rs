#![forbid(unsafe_code)]

//! Feature entries and the deck that holds them.
//!
//! A [`FeatureDeck`] is the static, ordered collection the carousel walks
//! through. It is validated once at construction and read-only afterwards,
//! so every index in `[0, len)` is valid for the component's lifetime and
//! the deck is never empty downstream.

use std::fmt;

/// One entry in the feature deck.
///
/// Entries are immutable records: a stable positive `id`, a short `title`
/// label, a display `heading`, a non-empty list of description bullets, and
/// an opaque `image` asset reference the host resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureEntry {
    id: u32,
    title: String,
    heading: String,
    description: Vec<String>,
    image: String,
}

impl FeatureEntry {
    /// Create an entry with an id, title label, and display heading.
    #[must_use]
    pub fn new(id: u32, title: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            heading: heading.into(),
            description: Vec::new(),
            image: String::new(),
        }
    }

    /// Append one description bullet.
    #[must_use]
    pub fn bullet(mut self, line: impl Into<String>) -> Self {
        self.description.push(line.into());
        self
    }

    /// Set the image asset reference.
    #[must_use]
    pub fn image(mut self, reference: impl Into<String>) -> Self {
        self.image = reference.into();
        self
    }

    /// Stable entry id.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Short title label.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display heading.
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Description bullets, in display order.
    #[must_use]
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Opaque image asset reference.
    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image
    }
}

/// Why a deck was rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The deck had no entries.
    Empty,
    /// An entry id is zero; ids must be positive.
    ZeroId,
    /// Two entries share the same id.
    DuplicateId(u32),
    /// The entry with this id has no description bullets.
    EmptyDescription(u32),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "feature deck has no entries"),
            Self::ZeroId => write!(f, "feature entry ids must be positive"),
            Self::DuplicateId(id) => write!(f, "duplicate feature entry id {id}"),
            Self::EmptyDescription(id) => {
                write!(f, "feature entry {id} has no description bullets")
            }
        }
    }
}

impl std::error::Error for DeckError {}

/// The ordered, non-empty collection of feature entries.
///
/// Construction enforces the invariants the rest of the system relies on:
/// at least one entry, positive unique ids, non-empty descriptions. The
/// progress fraction therefore never divides by zero and the auto-advance
/// driver always has somewhere to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDeck {
    entries: Vec<FeatureEntry>,
}

impl FeatureDeck {
    /// Validate and take ownership of the entries.
    pub fn new(entries: Vec<FeatureEntry>) -> Result<Self, DeckError> {
        if entries.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = Vec::with_capacity(entries.len());
        for entry in &entries {
            if entry.id == 0 {
                return Err(DeckError::ZeroId);
            }
            if seen.contains(&entry.id) {
                return Err(DeckError::DuplicateId(entry.id));
            }
            seen.push(entry.id);
            if entry.description.is_empty() {
                return Err(DeckError::EmptyDescription(entry.id));
            }
        }
        Ok(Self { entries })
    }

    /// Number of entries. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FeatureEntry> {
        self.entries.get(index)
    }

    /// All entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[FeatureEntry] {
        &self.entries
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureDeck {
    type Item = &'a FeatureEntry;
    type IntoIter = std::slice::Iter<'a, FeatureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
