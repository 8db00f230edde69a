//! Test utilities for property-based testing
