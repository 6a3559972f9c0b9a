//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::alloc::string::String;

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the largest id in a vocabulary is representable by `T`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// An encoded token: the id, and the text it was matched from.
///
/// For byte-fallback tokens, `text` is the byte piece's own text (``<0xXY>``);
/// otherwise it is the normalized input text, with whitespace separators intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<T: TokenType> {
    /// The token id.
    pub id: T,

    /// The matched text.
    pub text: String,
}

impl<T: TokenType> Token<T> {
    /// Create a new token.
    pub fn new<S: Into<String>>(
        id: T,
        text: S,
    ) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl<T: TokenType> Display for Token<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        write!(f, "Token{{id: {}, text: {:?}}}", self.id, self.text)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PCHashMap<K, V> {
            PCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            PCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = ahash::AHashSet<V>;

    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PCHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = foldhash::HashSet<V>;

    } else if #[cfg(feature = "std")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PCHashMap<K, V> {
            PCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            PCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = std::collections::HashSet<V>;

    } else if #[cfg(feature = "no_std")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = hashbrown::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> PCHashMap<K, V> {
            PCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            PCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = hashbrown::HashSet<V>;

    } else {
        /// This error exists to give users more direct feedback
        /// on the feature configuration over the other compilation
        /// errors they would encounter from lacking the types.
        compile_error!("not(\"std\") requires \"no_std\" feature");
    }
}
