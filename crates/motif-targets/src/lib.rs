//! Target implementations for the Motif compiler.
//!
//! Each target implements [`motif_compiler::Target`] once and ships its
//! runtime seeds, templates, and package skeleton under `sources/<target>/`.

pub mod utils;
pub mod web;

pub use web::WebTarget;
