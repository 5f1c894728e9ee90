//! Demonstration suites run by `minunit-demo`

pub mod basic;
pub mod verbose;

/// Setup hook shared by the demo suites
fn setup() {
    println!("Setting up test environment...");
}

/// Teardown hook shared by the demo suites
fn teardown() {
    println!("Cleaning up test environment...");
}
