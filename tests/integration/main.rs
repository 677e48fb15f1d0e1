//! Integration tests for the tintrace binary and library.

mod cli_test;
mod colorize_test;
mod helpers;
mod scheme_test;
