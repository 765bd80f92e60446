//! Property-based tests for class room transitions.
