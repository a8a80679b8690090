//! Aggregation engine
//!
//! Pure operations over a filtered row collection. Heavy work (grouping,
//! ranking, cross-tabulation) happens here rather than in the draw path.
//!
//! Every numeric input is checked for finiteness before it contributes;
//! non-finite values are skipped, never zero-filled.

mod average;
mod crosstab;
mod dedupe;
mod group;
mod rank;

pub use average::*;
pub use crosstab::*;
pub use dedupe::*;
pub use group::*;
pub use rank::*;
