//! The keyed-item abstraction shared by every reconciled collection.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An item with a caller-visible stable identity key.
///
/// The key is what matches a desired item to its observed counterpart
/// across reconciliation cycles: a server-assigned id where one exists
/// (IP blocks, networks), or a name where it does not (tags, node pools).
///
/// A keyed collection is simply an ordered `Vec` of such items. Ordering
/// is significant only for the desired side - the caller's declared order
/// must survive projection - while the observed side may arrive in any
/// order.
pub trait Keyed {
    /// The stable identifier type. `Display` is required so errors can
    /// name the offending key.
    type Key: Eq + Hash + Ord + Clone + Debug + Display;

    /// The stable identity of this item.
    fn key(&self) -> &Self::Key;
}

/// Extract the keys of a collection in its declared order.
///
/// The result is the order hint handed to [`crate::project`] after a
/// reconciliation cycle.
pub fn keys_of<T: Keyed>(items: &[T]) -> Vec<T::Key> {
    items.iter().map(|item| item.key().clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, u32);

    impl Keyed for Pair {
        type Key = &'static str;

        fn key(&self) -> &Self::Key {
            &self.0
        }
    }

    #[test]
    fn keys_preserve_declared_order() {
        let items = vec![Pair("b", 1), Pair("a", 2), Pair("c", 3)];
        assert_eq!(keys_of(&items), vec!["b", "a", "c"]);
        // Payload plays no part in identity.
        assert_eq!(items[0].1, 1);
    }

    #[test]
    fn keys_of_empty_collection() {
        let items: Vec<Pair> = vec![];
        assert!(keys_of(&items).is_empty());
    }
}
