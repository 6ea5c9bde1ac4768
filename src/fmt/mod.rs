//! Code formatting
//!
//! This module provides pretty-printing for parsed programs. The output is
//! valid source that parses back to the same tree.

pub mod surface;
