//! Function approximators for per-step hedge decisions.
//!
//! - [`Linear`]: dense affine layer
//! - [`Mlp`]: layer stack with ReLU hidden activations
//!
//! Both are generic over `T: Scalar`; a network rebuilt over dual numbers
//! (see [`Mlp::with_parameters`]) propagates parameter derivatives through
//! its forward pass.

pub mod error;
pub mod linear;
pub mod mlp;

pub use error::NetworkError;
pub use linear::Linear;
pub use mlp::Mlp;
