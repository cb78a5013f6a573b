//! Nexlog Plugin SDK
//!
//! Types shared by the kernel and content plugins: content types and
//! component slots, the structured user input, component references, and the
//! Unbody query model plugins compose their searches with.

pub mod component;
pub mod query;
pub mod types;

// Re-export serde_json so plugins building component props need no extra dependency
#[doc(hidden)]
pub use serde_json;

pub mod prelude {
    pub use crate::component::{self, ComponentRef};
    pub use crate::query::{AboutSearch, GenerateMany, Operators, Predicate, UnbodyQuery};
    pub use crate::types::*;
}
