//! Command implementations for the `dfs-optimizer` CLI.

pub mod optimize;
