//! Ordered collections addressable by position or by label.
//!
//! Every functional unit of a device holds its channels in a [`Registry`], and analog output and
//! analog IO channels hold their nodes in one as well. Position is the primary key: index `i` is
//! the native zero-based index of the channel, and it never changes for the life of the device.
//! Labels are a secondary, mutable alias layered on top of the same backing storage.
//!
//! ```ignore
//! let scope = device.analog_input()?;
//! let by_index = scope.channel(0usize)?;
//! let by_label = scope.channel("ch1")?;
//! assert_eq!(by_index.index(), by_label.index());
//! ```
//!
//! Labels are only required to be unique when they are looked up: renaming two channels to the
//! same label is accepted, but resolving that label afterwards fails with
//! [`AddressingError::AmbiguousLabel`].

use std::fmt;

use dwf_backend::{AddressingError, Result};

/// Key used to look up an entry of a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address<'a> {
    Index(usize),
    Label(&'a str),
}

impl From<usize> for Address<'_> {
    fn from(index: usize) -> Self {
        Address::Index(index)
    }
}

impl<'a> From<&'a str> for Address<'a> {
    fn from(label: &'a str) -> Self {
        Address::Label(label)
    }
}

impl<'a> From<&'a String> for Address<'a> {
    fn from(label: &'a String) -> Self {
        Address::Label(label.as_str())
    }
}

impl fmt::Display for Address<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::Index(index) => write!(f, "#{}", index),
            Address::Label(label) => write!(f, "'{}'", label),
        }
    }
}

/// Fixed-size, order-preserving collection with a label alias per entry.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    labels: Vec<String>,
}

impl<T> Registry<T> {
    /// Builds a registry from `(label, item)` pairs; positions follow iteration order.
    pub fn new(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let (labels, items) = entries.into_iter().unzip();
        Self { items, labels }
    }

    /// Builds a registry of `count` entries labeled by `label(index)`.
    pub fn from_fn(count: usize, label: impl Fn(usize) -> String, item: impl Fn(usize) -> T) -> Self {
        Self::new((0..count).map(|index| (label(index), item(index))))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves `address` to a position.
    pub fn index_of<'a>(&self, address: impl Into<Address<'a>>) -> Result<usize> {
        match address.into() {
            Address::Index(index) if index < self.len() => Ok(index),
            Address::Index(index) => Err(AddressingError::IndexOutOfRange {
                index,
                len: self.len(),
            }
            .into()),
            Address::Label(label) => {
                let mut matches = self
                    .labels
                    .iter()
                    .enumerate()
                    .filter(|(_, candidate)| candidate.as_str() == label)
                    .map(|(index, _)| index);
                match (matches.next(), matches.next()) {
                    (Some(index), None) => Ok(index),
                    (Some(_), Some(_)) => Err(AddressingError::AmbiguousLabel(label.to_string()).into()),
                    (None, _) => Err(AddressingError::UnknownLabel(label.to_string()).into()),
                }
            }
        }
    }

    pub fn get<'a>(&self, address: impl Into<Address<'a>>) -> Result<&T> {
        let index = self.index_of(address)?;
        Ok(&self.items[index])
    }

    pub fn get_mut<'a>(&mut self, address: impl Into<Address<'a>>) -> Result<&mut T> {
        let index = self.index_of(address)?;
        Ok(&mut self.items[index])
    }

    /// Label currently assigned to the entry at `index`.
    pub fn label(&self, index: usize) -> Result<&str> {
        let index = self.index_of(index)?;
        Ok(&self.labels[index])
    }

    /// Renames the entry at `address`. Its position is unchanged.
    pub fn set_label<'a>(&mut self, address: impl Into<Address<'a>>, label: impl Into<String>) -> Result<()> {
        let index = self.index_of(address)?;
        self.labels[index] = label.into();
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Iterates over `(label, item)` pairs in position order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &T)> {
        self.labels.iter().map(String::as_str).zip(self.items.iter())
    }
}

impl<'r, T> IntoIterator for &'r Registry<T> {
    type Item = &'r T;
    type IntoIter = std::slice::Iter<'r, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwf_backend::DwfError;

    fn channels() -> Registry<u32> {
        Registry::from_fn(4, |i| format!("ch{}", i + 1), |i| 10 * i as u32)
    }

    #[test]
    fn index_and_label_resolve_to_the_same_entry() {
        let registry = channels();
        for index in 0..registry.len() {
            let label = registry.label(index).unwrap().to_string();
            assert_eq!(registry.index_of(&label).unwrap(), index);
            assert!(std::ptr::eq(registry.get(index).unwrap(), registry.get(&label).unwrap()));
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = channels().get(4usize).unwrap_err();
        assert!(matches!(
            err,
            DwfError::Addressing(AddressingError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = channels().get("ch0").unwrap_err();
        assert!(matches!(err, DwfError::Addressing(AddressingError::UnknownLabel(label)) if label == "ch0"));
    }

    #[test]
    fn renaming_keeps_position() {
        let mut registry = channels();
        registry.set_label("ch2", "probe").unwrap();
        assert_eq!(registry.index_of("probe").unwrap(), 1);
        assert_eq!(*registry.get("probe").unwrap(), 10);
        assert!(registry.get("ch2").is_err());
    }

    #[test]
    fn duplicate_labels_are_ambiguous_on_lookup() {
        let mut registry = channels();
        registry.set_label(0usize, "same").unwrap();
        registry.set_label(3usize, "same").unwrap();
        let err = registry.index_of("same").unwrap_err();
        assert!(matches!(err, DwfError::Addressing(AddressingError::AmbiguousLabel(_))));
        assert_eq!(registry.index_of(3usize).unwrap(), 3);
    }

    #[test]
    fn empty_registry_rejects_every_index() {
        let registry: Registry<u32> = Registry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.get(0usize).is_err());
    }
}
