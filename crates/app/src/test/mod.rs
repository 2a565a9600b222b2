//! Shared test infrastructure: per-test databases and a pre-wired context.


pub(crate) use context::TestContext;
