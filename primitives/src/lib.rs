#![cfg_attr(not(feature = "std"), no_std)]

pub mod ecosystem;
pub mod fixed_math;
pub mod rebates;
pub mod traits;

pub use ecosystem::*;
pub use traits::*;
