//! Claim domain: document schema, workflow state machine, map attachment
//! and the store that applies transitions.

pub mod mapdata;
pub mod status;
pub mod store;
pub mod types;
pub mod workflow;
