/// Integration test suite entry point
///
/// The named `integration` test target in Cargo.toml points at this file.
/// These tests exercise the SQLite store and the tool layer end to end.

mod tool_tests;
