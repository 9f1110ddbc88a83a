/// Unit test suite entry point
///
/// The named `unit` test target in Cargo.toml points at this file; each
/// module below is one themed batch of tests.

mod domain_tests;
mod analytics_tests;
