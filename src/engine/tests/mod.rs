#![cfg(test)]

#[cfg(unix)]
mod process_tests;
