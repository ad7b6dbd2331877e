//! Edge case tests for rbc-lex
