//! Common test utilities for lowering tests

#[allow(unused_imports)]
pub mod builders;
#[allow(unused_imports)]
pub mod fixtures;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use fixtures::*;
