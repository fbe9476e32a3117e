//! Property-based tests for the block model.
