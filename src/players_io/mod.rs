//! Adapters that load a player pool from something other than an inline
//! JSON request body. Out of the optimizer's algorithmic core (spec.md §1),
//! kept at arm's length so `generator`/`position_groups`/`slot_assigner`
//! never depend on a file format.

pub mod csv;
