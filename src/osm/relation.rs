/// A key/value tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Attributes and tags of a multipolygon relation.
///
/// Members are resolved elsewhere; the assembler receives them as ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub id: i64,
    pub version: u32,
    pub changeset: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub visible: bool,
    pub uid: u32,
    pub user: String,
    pub tags: Vec<Tag>,
}

impl Relation {
    /// Creates a visible relation with empty metadata.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            version: 0,
            changeset: 0,
            timestamp: 0,
            visible: true,
            uid: 0,
            user: String::new(),
            tags: Vec::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }
}
