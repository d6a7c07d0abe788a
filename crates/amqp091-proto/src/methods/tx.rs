//! `Tx` class (class id 90): channel-local transactions over publishes and
//! acknowledgements. None of these methods carry fields.

use bytes::BufMut;

use crate::error::Result;

/// Class id for `Tx`.
pub const CLASS_ID: u16 = 90;

macro_rules! empty_method {
    ($name:ident, $method_id:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            /// Method id.
            pub const METHOD_ID: u16 = $method_id;

            pub(crate) fn encode(&self, _dst: &mut impl BufMut) -> Result<()> {
                Ok(())
            }

            pub(crate) fn decode(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
                Ok((Self, offset))
            }
        }
    };
}

empty_method!(Select, 10, "Put the channel into transactional mode.");
empty_method!(SelectOk, 11, "Acknowledges a successful `Select`.");
empty_method!(Commit, 20, "Commit the current transaction.");
empty_method!(CommitOk, 21, "Acknowledges a successful `Commit`.");
empty_method!(Rollback, 30, "Roll back the current transaction.");
empty_method!(RollbackOk, 31, "Acknowledges a successful `Rollback`.");
