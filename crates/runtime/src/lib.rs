//! Runtime utilities shared by the Neoscope binaries.
#![allow(missing_docs)]

pub mod health;
pub mod shutdown;
