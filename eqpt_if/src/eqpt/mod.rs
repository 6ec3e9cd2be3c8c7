//! # Equipment contracts
//!
//! One submodule per piece of equipment the head depends on.

pub mod analog;
pub mod audio;
pub mod cam;
pub mod servo;
pub mod sol;
