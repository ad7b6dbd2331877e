//! Edge case tests for rbc-sem
