//! Response specification types

mod spec;

pub use spec::{ResponseSpec, StatusCode};
