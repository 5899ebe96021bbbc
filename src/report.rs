//! Renders an [`OrderedKeyIndex`] as a sorted text report. The index only produces the
//! `(key, occurrences)` sequence; everything about layout lives here.
//!
//! Each line holds a key, a space, and then the key's occurrences separated by `", "`. The first
//! occurrence is right-aligned so that it ends in the same column for every key shorter than
//! [`ReportConfig::key_width`].
//!
//! # Examples
//!
//! ```
//! use key_index::index::OrderedKeyIndex;
//! use key_index::report::{OccurrenceList, Report, ReportConfig};
//!
//! let index: OrderedKeyIndex<_> = [("pear", 2), ("apple", 3), ("apple", 7)]
//!     .into_iter()
//!     .collect();
//!
//! let config = ReportConfig {
//!     key_width: 8,
//!     ..ReportConfig::default()
//! };
//! let report = Report::with_config(&index, config).to_string();
//! assert_eq!(report, "apple   3, 7\npear    2\n");
//!
//! assert_eq!(OccurrenceList::new(index.search(&"apple")).to_string(), "3, 7");
//! ```

use std::fmt;

use crate::index::{Marker, OrderedKeyIndex};

/// Layout settings for a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Column the first occurrence is aligned against, counted from the start of the key.
    /// Keys at least this long are followed by the first occurrence after a single space.
    pub key_width: usize,
    /// Written between consecutive occurrences.
    pub separator: String,
    /// Written (followed by a newline) in place of any lines when the index is empty.
    pub empty_message: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            key_width: 17,
            separator: ", ".to_string(),
            empty_message: "Empty tree".to_string(),
        }
    }
}

/// Displays a list of occurrences in the order they were recorded, e.g. `3, 7, 12`.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceList<'a> {
    markers: &'a [Marker],
    separator: &'a str,
}

impl<'a> OccurrenceList<'a> {
    /// Displays `markers` separated by `", "`.
    pub fn new(markers: &'a [Marker]) -> Self {
        Self::with_separator(markers, ", ")
    }

    /// Displays `markers` separated by `separator`.
    pub fn with_separator(markers: &'a [Marker], separator: &'a str) -> Self {
        Self { markers, separator }
    }
}

impl fmt::Display for OccurrenceList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut markers = self.markers.iter();
        if let Some(first) = markers.next() {
            write!(f, "{}", first)?;
        }
        for marker in markers {
            write!(f, "{}{}", self.separator, marker)?;
        }
        Ok(())
    }
}

/// A full, sorted report of an index. Build one and format it with `Display`.
pub struct Report<'a, K> {
    index: &'a OrderedKeyIndex<K>,
    config: ReportConfig,
}

impl<'a, K> Report<'a, K> {
    /// A report of `index` using [`ReportConfig::default`].
    pub fn new(index: &'a OrderedKeyIndex<K>) -> Self {
        Self::with_config(index, ReportConfig::default())
    }

    /// A report of `index` laid out according to `config`.
    pub fn with_config(index: &'a OrderedKeyIndex<K>, config: ReportConfig) -> Self {
        Self { index, config }
    }
}

impl<K> fmt::Display for Report<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index.is_empty() {
            return writeln!(f, "{}", self.config.empty_message);
        }

        for (key, markers) in self.index {
            let Some((first, rest)) = markers.split_first() else {
                continue;
            };
            let key = key.to_string();
            let width = self.config.key_width.saturating_sub(key.chars().count());
            write!(f, "{} {:>width$}", key, first, width = width)?;
            if !rest.is_empty() {
                let rest = OccurrenceList::with_separator(rest, &self.config.separator);
                write!(f, "{}{}", self.config.separator, rest)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
