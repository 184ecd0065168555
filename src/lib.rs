extern crate rand;

pub mod types;
pub mod error;
pub mod config;

pub mod graph_representation;
pub mod graph_algorithms;
pub mod routing_table;
pub mod utils;

pub use config::{RoutingConfig, UnreachablePolicy};
pub use error::RoutingError;
pub use graph_representation::{RoutingGraph, WeightedGraph};
pub use routing_table::{compute, RoutingTable, RoutingTableBuilder};
