//! archdeps library: member-level dependency extraction over decoded .NET metadata.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
