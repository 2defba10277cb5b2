//! Wire and domain types for seekset pagination: the scalar value union,
//! the ordering model, limit normalization and the cursor wire element.

pub mod core;
pub mod error;
pub mod ordering;
pub mod pagination;
