//! Demo planner: seeds an in-memory bakery and regenerates its display case.

pub mod seed;
