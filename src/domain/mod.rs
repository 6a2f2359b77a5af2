pub mod builder;
pub mod edge;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod metadata;
pub mod naming;
pub mod node;
pub mod options;
pub mod ports;
pub mod reconciler;
pub mod scanner;
pub mod type_registry;
