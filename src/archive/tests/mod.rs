#![cfg(test)]

mod packager_tests;
