//! Library surface of the `canvass` command-line tool.

pub mod cli;
pub mod config;
