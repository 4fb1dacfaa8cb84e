use std::slice;

/// An ordered list of strings handed across the binding boundary as one
/// value, for example the family names found by a typeface lookup.
///
/// Holds exactly the values pushed, in push order. No deduplication and no
/// sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strings {
    strings: Vec<String>,
}

impl Strings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value. The only supported mutation.
    #[inline]
    pub fn push(&mut self, value: impl Into<String>) {
        self.strings.push(value.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.strings.iter(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.strings
    }

    pub fn into_vec(self) -> Vec<String> {
        self.strings
    }
}

/// Iterator over the values of a [`Strings`] list.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Strings {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Strings {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.strings.into_iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Strings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Strings {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.strings.extend(iter.into_iter().map(Into::into));
    }
}

impl From<Vec<String>> for Strings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let strings = Strings::new();
        assert!(strings.is_empty());
        assert_eq!(strings.iter().next(), None);
    }

    #[test]
    fn preserves_push_order() {
        let mut strings = Strings::new();
        strings.push("a");
        strings.push("b");
        strings.push(String::from("c"));

        assert_eq!(strings.len(), 3);
        assert_eq!(strings.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(strings.get(1), Some("b"));
        assert_eq!(strings.get(3), None);
    }

    #[test]
    fn keeps_duplicates() {
        let strings: Strings = ["Roboto", "Arial", "Roboto"].into_iter().collect();
        assert_eq!(strings.len(), 3);
        assert_eq!(strings.into_vec(), ["Roboto", "Arial", "Roboto"]);
    }

    #[test]
    fn extend_appends_after_existing() {
        let mut strings = Strings::from(vec!["x".to_string()]);
        strings.extend(["y", "z"]);
        assert_eq!(strings.iter().rev().collect::<Vec<_>>(), ["z", "y", "x"]);
    }
}
