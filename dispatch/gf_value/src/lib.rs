//! gf Value - tagged value representation for the gf dispatch engine.
//!
//! This crate provides the value layer the dispatch engine resolves
//! against:
//! - `ClassTag` / `ClassVector`: ordered type-identity labels, most
//!   specific first
//! - `Payload`: physical representations with intrinsic fallback
//!   classification
//! - `Value`: opaque payload plus optional explicit class vector
//! - `Classify`: the two obligations the value layer owes the resolver
//!
//! The engine itself lives in `gf_dispatch`; this crate has no
//! knowledge of registries or resolution orders beyond producing the
//! tags they consume.

mod tags;
mod value;

pub use tags::{class_vector, ClassTag, ClassVector};
pub use value::{Classify, Payload, Value};
