// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Snapshot of the metadata tags found in one image.

/// One displayable tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataTag {
    pub name: String,
    pub value: String,
}

/// Tags in the order the container stores them.
///
/// A snapshot: once extracted it is not linked back to the file it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataTagSet {
    tags: Vec<MetadataTag>,
}

impl MetadataTagSet {
    /// Append a tag. A repeated name keeps the first value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.get(&name).is_some() {
            return;
        }
        self.tags.push(MetadataTag {
            name,
            value: value.into(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::MetadataTagSet;

    #[test]
    fn insert_keeps_order_and_first_value() {
        let mut tags = MetadataTagSet::default();
        tags.insert("Make", "Acme");
        tags.insert("Model", "X1");
        tags.insert("Make", "Other");

        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Make", "Model"]);
        assert_eq!(tags.get("Make"), Some("Acme"));
        assert_eq!(tags.len(), 2);
    }
}
