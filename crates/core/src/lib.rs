//! Domain logic for menu preference-group configuration.
//!
//! Pure types and functions shared by the database and API layers:
//! group enums and field parsing, child-row collection, and the sparse
//! rule-payload planner. No I/O lives here.

pub mod error;
pub mod group;
pub mod rules;
pub mod types;
