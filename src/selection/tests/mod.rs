#![cfg(test)]

mod parser_tests;
