#[macro_use]
extern crate quickcheck_macros;

use key_index::Marker;
use quickcheck::{Arbitrary, Gen};

mod index;

/// An enum for the various kinds of "things" to do to
/// an index in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Record the marker as an occurrence of K
    Insert(K, Marker),
    /// Remove the K from the index
    Remove(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g), Marker::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}
