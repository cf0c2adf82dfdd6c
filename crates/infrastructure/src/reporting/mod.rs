//! Reporting adapters

mod console;

pub use console::ConsoleReporter;
