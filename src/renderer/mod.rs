//! Rendering interface
//!
//! The GPU pipeline lives outside this crate; drawable primitives are
//! tessellated into plain triangle lists of [`Vertex`].

pub mod vertex;

pub use vertex::{Vertex, as_bytes};
