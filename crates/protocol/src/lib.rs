//! # Promdash Protocol
//!
//! Typed dashboard documents and the failure taxonomy shared by the store
//! client, the metrics source and the synthesis pipeline.
//!
//! Raw JSON only exists at the store-client edge; everything past it works
//! with [`Dashboard`] and [`Panel`].

mod dashboard;
mod failure;

pub use dashboard::{
    Dashboard, DashboardRef, GridPos, Panel, SaveConfirmation, Target, DASHBOARD_SCHEMA_VERSION,
};
pub use failure::{ErrorKind, ToolFailure};
