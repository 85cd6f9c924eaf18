#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod arena;
mod error;
mod iter;
mod key;
mod level;
mod node;
mod trie;

#[cfg(feature = "stats")]
mod stats;

#[cfg(test)]
mod tests;

use std::fmt;

use trie::RawTrie;

pub use error::{Error, KeyError, Result};
pub use iter::Iter;
pub use key::{KeyInput, MAX_WIDTH};

#[cfg(feature = "stats")]
#[cfg_attr(docsrs, doc(cfg(feature = "stats")))]
pub use stats::{LevelStats, TrieStats};

/// An ordered set of `W`-bit unsigned integers with O(log log U) predecessor
/// and successor queries, where U = 2^W.
///
/// Keys are anything implementing [KeyInput]: unsigned and signed integers
/// (negative values are rejected) and big-endian byte sequences.
///
/// The trie is a plain single-threaded structure. Wrap it in a single
/// `Mutex` if it must be shared.
#[derive(Clone)]
pub struct XFastTrie {
    inner: RawTrie,
}

impl Default for XFastTrie {
    /// A trie over the full 64-bit universe.
    fn default() -> Self {
        Self::with_width(MAX_WIDTH)
    }
}

impl XFastTrie {
    fn with_width(width: u32) -> Self {
        log::debug!("new x-fast trie, width {width}");
        XFastTrie {
            inner: RawTrie::new(width),
        }
    }

    /// Creates an empty trie holding keys of `width` bits.
    ///
    /// # Errors
    ///
    /// [Error::InvalidWidth] if `width` is 0 or above [MAX_WIDTH].
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::{Error, XFastTrie};
    /// let trie = XFastTrie::new(16).unwrap();
    /// assert_eq!(trie.width(), 16);
    /// assert_eq!(XFastTrie::new(0).unwrap_err(), Error::InvalidWidth(0));
    /// assert!(XFastTrie::new(65).is_err());
    /// ```
    pub fn new(width: u32) -> Result<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(Error::InvalidWidth(width));
        }
        Ok(Self::with_width(width))
    }

    /// Creates an empty trie just wide enough to hold `max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// assert_eq!(XFastTrie::with_max_value(255).width(), 8);
    /// assert_eq!(XFastTrie::with_max_value(256).width(), 9);
    /// assert_eq!(XFastTrie::with_max_value(0).width(), 1);
    /// ```
    pub fn with_max_value(max: u64) -> Self {
        let bits = u64::BITS - max.leading_zeros();
        Self::with_width(bits.max(1))
    }

    /// Creates an empty trie for keys given as `bytes`-long big-endian buffers.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::with_byte_len(2).unwrap();
    /// assert_eq!(trie.width(), 16);
    /// trie.insert([0x12u8, 0x34]).unwrap();
    /// assert!(trie.contains(0x1234u32).unwrap());
    /// ```
    pub fn with_byte_len(bytes: usize) -> Result<Self> {
        let width = u32::try_from(bytes.saturating_mul(8)).unwrap_or(u32::MAX);
        Self::new(width)
    }

    /// Creates a trie of `width` bits holding every key of `keys`.
    ///
    /// All keys are validated before the first one is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let trie = XFastTrie::from_keys(8, [3u8, 1, 2, 3]).unwrap();
    /// assert_eq!(trie.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert!(XFastTrie::from_keys(8, [1u32, 300]).is_err());
    /// ```
    pub fn from_keys<K: KeyInput>(width: u32, keys: impl IntoIterator<Item = K>) -> Result<Self> {
        let mut trie = Self::new(width)?;
        trie.insert_many(keys)?;
        Ok(trie)
    }

    /// Number of bits in every key.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Inserts a key. Returns true if the key was newly inserted, false if it was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::new(8).unwrap();
    ///
    /// assert!(trie.insert(42u8).unwrap());
    /// assert!(!trie.insert(42u8).unwrap()); // Already present
    /// assert!(trie.insert(256u32).is_err()); // Needs 9 bits
    /// ```
    pub fn insert<K: KeyInput>(&mut self, key: K) -> Result<bool> {
        let key = key.to_fixed_width(self.width())?;
        Ok(self.inner.insert(key))
    }

    /// Inserts every key of `keys`, returns how many were new.
    ///
    /// Nothing is inserted if any key is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::new(8).unwrap();
    /// assert_eq!(trie.insert_many([1u8, 2, 2, 3]).unwrap(), 3);
    /// assert!(trie.insert_many([4i32, -1]).is_err());
    /// assert_eq!(trie.len(), 3);
    /// ```
    pub fn insert_many<K: KeyInput>(&mut self, keys: impl IntoIterator<Item = K>) -> Result<usize> {
        let width = self.width();
        let keys = keys
            .into_iter()
            .map(|k| k.to_fixed_width(width))
            .collect::<Result<Vec<_>>>()?;
        Ok(keys.into_iter().filter(|k| self.inner.insert(*k)).count())
    }

    /// Removes a key. Returns true if the key was present and removed, false if it was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::new(8).unwrap();
    ///
    /// trie.insert(1u8).unwrap();
    /// assert!(trie.delete(1u8).unwrap());
    /// assert!(!trie.delete(1u8).unwrap()); // Not present anymore
    /// ```
    pub fn delete<K: KeyInput>(&mut self, key: K) -> Result<bool> {
        let key = key.to_fixed_width(self.width())?;
        Ok(self.inner.remove(key))
    }

    /// Removes a key that must be present.
    ///
    /// # Errors
    ///
    /// [Error::KeyNotFound] if the key is not stored, [Error::InvalidKey] if it
    /// does not fit the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::{Error, XFastTrie};
    /// let mut trie = XFastTrie::new(8).unwrap();
    /// trie.insert(7u8).unwrap();
    ///
    /// trie.try_delete(7u8).unwrap();
    /// assert_eq!(trie.try_delete(7u8), Err(Error::KeyNotFound(7)));
    /// ```
    pub fn try_delete<K: KeyInput>(&mut self, key: K) -> Result<()> {
        let key = key.to_fixed_width(self.width())?;
        if self.inner.remove(key) {
            Ok(())
        } else {
            Err(Error::KeyNotFound(key))
        }
    }

    /// Checks if the trie contains the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::new(16).unwrap();
    ///
    /// trie.insert(1u16).unwrap();
    /// assert!(trie.contains(1u16).unwrap());
    /// assert!(trie.contains([0x00u8, 0x01]).unwrap());
    /// assert!(!trie.contains(2u16).unwrap());
    /// ```
    #[inline]
    pub fn contains<K: KeyInput>(&self, key: K) -> Result<bool> {
        let key = key.to_fixed_width(self.width())?;
        Ok(self.inner.find(key).is_some())
    }

    /// Returns the largest stored key strictly smaller than `key`.
    /// `key` itself does not need to be stored.
    ///
    /// # Errors
    ///
    /// [Error::EmptyTrie] if the trie holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::{Error, XFastTrie};
    /// let mut trie = XFastTrie::new(8).unwrap();
    /// assert_eq!(trie.predecessor(3u8), Err(Error::EmptyTrie));
    ///
    /// trie.insert_many([5u8, 20, 100]).unwrap();
    /// assert_eq!(trie.predecessor(50u8).unwrap(), Some(20));
    /// assert_eq!(trie.predecessor(20u8).unwrap(), Some(5));
    /// assert_eq!(trie.predecessor(5u8).unwrap(), None);
    /// ```
    pub fn predecessor<K: KeyInput>(&self, key: K) -> Result<Option<u64>> {
        let key = key.to_fixed_width(self.width())?;
        if self.is_empty() {
            return Err(Error::EmptyTrie);
        }
        Ok(self.inner.predecessor(key).map(|l| self.inner.value(l)))
    }

    /// Returns the smallest stored key strictly greater than `key`.
    /// `key` itself does not need to be stored.
    ///
    /// # Errors
    ///
    /// [Error::EmptyTrie] if the trie holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::new(8).unwrap();
    /// trie.insert_many([5u8, 20, 100]).unwrap();
    ///
    /// assert_eq!(trie.successor(50u8).unwrap(), Some(100));
    /// assert_eq!(trie.successor(5u8).unwrap(), Some(20));
    /// assert_eq!(trie.successor(100u8).unwrap(), None);
    /// ```
    pub fn successor<K: KeyInput>(&self, key: K) -> Result<Option<u64>> {
        let key = key.to_fixed_width(self.width())?;
        if self.is_empty() {
            return Err(Error::EmptyTrie);
        }
        Ok(self.inner.successor(key).map(|l| self.inner.value(l)))
    }

    /// Smallest stored key, `None` if empty.
    #[inline]
    pub fn min(&self) -> Option<u64> {
        self.inner.min_node().map(|l| self.inner.value(l))
    }

    /// Largest stored key, `None` if empty.
    #[inline]
    pub fn max(&self) -> Option<u64> {
        self.inner.max_node().map(|l| self.inner.value(l))
    }

    /// Iterates over the keys in ascending order.
    ///
    /// Each call starts a fresh walk from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let trie = XFastTrie::from_keys(8, [200u8, 5, 100, 20]).unwrap();
    ///
    /// assert_eq!(trie.iter().collect::<Vec<_>>(), vec![5, 20, 100, 200]);
    /// assert_eq!(trie.iter().rev().next(), Some(200));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.inner)
    }

    /// Removes every key, keeping the width.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let mut trie = XFastTrie::from_keys(8, [1u8, 2, 3]).unwrap();
    /// trie.clear();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.min(), None);
    /// ```
    pub fn clear(&mut self) {
        log::debug!("clearing x-fast trie with {} keys", self.len());
        self.inner.clear();
    }

    /// Renders `key` as exactly [XFastTrie::width] ones and zeros, most
    /// significant bit first.
    ///
    /// # Examples
    ///
    /// ```
    /// use xfast::XFastTrie;
    /// let trie = XFastTrie::new(6).unwrap();
    /// assert_eq!(trie.key_bits(5u8).unwrap(), "000101");
    /// ```
    pub fn key_bits<K: KeyInput>(&self, key: K) -> Result<String> {
        let key = key.to_fixed_width(self.width())?;
        Ok(key::bit_string(key, self.width()))
    }

    /// Per level node statistics.
    #[cfg(feature = "stats")]
    #[cfg_attr(docsrs, doc(cfg(feature = "stats")))]
    pub fn stats(&self) -> TrieStats {
        self.inner.stats()
    }
}

impl<'a> IntoIterator for &'a XFastTrie {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for XFastTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
