//! Selection state machine.
//!
//! ```text
//!   Empty ──lookup resolved──► Selected(single)
//!     │                       Selected(multi, unresolved) ──variant──► Selected(resolved)
//!     ▲                                   │
//!     └────────── submit success ─────────┘   (submit failure: unchanged)
//! ```
//!
//! A newer lookup resolution replaces whatever is selected. Responses to
//! superseded lookups are dropped.

mod reducer;
mod state;

pub use reducer::{Effect, LookupTicket, SelectionAction, SelectionReducer};
pub use state::{
    LookupStatus, LookupToken, SelectedProduct, SelectionState, SkuVariant, SubmissionStatus,
};
