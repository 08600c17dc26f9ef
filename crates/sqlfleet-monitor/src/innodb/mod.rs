//! InnoDB engine status parsing

mod parser;


pub use parser::{InnoDbCounters, InnoDbSection, parse_innodb_counters};
