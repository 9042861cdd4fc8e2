//! Inheritance resolution: from a class and its ancestors to the effective
//! interface the emitters consume.
//!
//! ```text
//! ClassDescription ─┬─ ancestors (root-most first)
//!                   └─ local members
//!         │
//!         ▼ resolve()
//! EffectiveInterface  (ordered members, states, constraints, warnings)
//! ```

mod effective;
mod resolver;

pub use effective::{EffectiveInterface, MemberMap, Resolved};
pub use resolver::resolve;
