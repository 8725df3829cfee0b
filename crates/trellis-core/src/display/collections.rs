//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections a `Display` implementation with
//! consistent structure and graceful empty-collection handling.

use std::{fmt, ops::Index};

use crate::models::ProgressRecord;

/// Newtype wrapper for displaying collections of progress records.
pub struct ProgressRecords(pub Vec<ProgressRecord>);

impl ProgressRecords {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of records in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, ProgressRecord> {
        self.0.iter()
    }
}

impl Index<usize> for ProgressRecords {
    type Output = ProgressRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ProgressRecords {
    type Item = ProgressRecord;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProgressRecords {
    type Item = &'a ProgressRecord;
    type IntoIter = std::slice::Iter<'a, ProgressRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ProgressRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No progress records found.")?;
            return Ok(());
        }

        for record in &self.0 {
            writeln!(
                f,
                "- {}: user {} on plan {} ({:.1}%)",
                record.id, record.user_id, record.plan_id, record.percent_complete
            )?;
        }

        Ok(())
    }
}

/// Newtype wrapper for displaying a badge list.
pub struct Badges(pub Vec<String>);

impl Badges {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of badges in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Badges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No badges earned yet.")?;
            return Ok(());
        }

        for badge in &self.0 {
            writeln!(f, "- {badge}")?;
        }

        Ok(())
    }
}
