use quickcheck::{Arbitrary, Gen};

use crate::index::Marker;

/// An enum for the various kinds of "things" to do to
/// an index in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Record the marker as an occurrence of K
    Insert(K, Marker),
    /// Remove the K from the index
    Remove(K),
    /// Compare iterators
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), Marker::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
