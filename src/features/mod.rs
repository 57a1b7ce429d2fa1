//! Turning raw form values into a scaled model input.
//!
//! - categorical encoding, trained or positional (`encode`)
//! - fixed-order row assembly (`assemble`)
//! - fitted scalers (`scale`)

pub mod assemble;
pub mod encode;
pub mod scale;

pub use assemble::*;
pub use encode::*;
pub use scale::*;
