//! Lattice-matched stacking of 2D materials
//!
//! This library builds layered heterostructures from periodic 2D layers: it searches
//! integer supercell transformations that make two in-plane lattices coincide within a
//! strain budget, builds the matching supercells, and stacks them with a fixed gap and
//! vacuum padding along the out-of-plane axis.
//!
//! Quick reference
//! - Lattices: [`lattice::Lattice2D`], [`lattice::TransformationMatrix`]
//! - Matching: [`matching::find_match`], [`matching::ZslMatcher`], [`matching::Match`]
//! - Structures: [`structure::Structure`], [`structure::build_oriented_supercell`], [`structure::join`]
//! - Pipeline: [`generator::HeterostructureGenerator`], [`generator::LayerSpec`]
//! - Files: [`io::read_xyz`], [`io::write_xyz`], [`io::StackOptions`]

pub mod config;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod io;
pub mod lattice;
pub mod matching;
pub mod structure;

pub use error::{Result, StackError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
