//! Property-based tests for scoring bounds and selection determinism
