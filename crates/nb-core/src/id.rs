//! Interned identifiers for nodes and edges.
//!
//! Ids are `Spur` handles into one process-wide interner: 4 bytes, `Copy`,
//! O(1) `Eq`/`Hash`. The string form is what the presentation layer sees.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Shared by every id kind so a node and an edge never mint the same string.
static COUNTER: AtomicU64 = AtomicU64::new(0);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern `s` as an id, reusing the existing handle if present.
            pub fn intern(s: &str) -> Self {
                Self(INTERNER.get_or_intern(s))
            }

            /// Look up an id without interning. `None` means no such id was
            /// ever created, so it cannot reference anything in a store.
            pub fn lookup(s: &str) -> Option<Self> {
                INTERNER.get(s).map(Self)
            }

            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// Mint an id that has never been handed out before.
            pub fn fresh() -> Self {
                loop {
                    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
                    let candidate = format!(concat!($prefix, "_{}"), n);
                    // Skip strings a host already interned by hand.
                    if INTERNER.get(&candidate).is_none() {
                        return Self::intern(&candidate);
                    }
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a node in the graph store.
    NodeId,
    "node"
);

interned_id!(
    /// Identifier of an edge in the graph store.
    EdgeId,
    "edge"
);
