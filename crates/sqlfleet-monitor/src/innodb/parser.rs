//! Section-aware scanner for `SHOW ENGINE INNODB STATUS` output

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MUTEX_SPIN_WAITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Mutex spin waits\s+(\d+),\s+rounds\s+(\d+),\s+OS waits\s+(\d+)")
        .expect("valid regex")
});

/// Section of the InnoDB monitor output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnoDbSection {
    /// Anything before the first recognized header
    Preamble,
    BackgroundThread,
    Semaphores,
    LatestForeignKeyError,
    LatestDetectedDeadlock,
    Transactions,
    FileIo,
    InsertBufferAndAdaptiveHashIndex,
    Log,
    BufferPoolAndMemory,
    IndividualBufferPoolInfo,
    RowOperations,
    EndOfOutput,
}

impl InnoDbSection {
    /// Every section that has a header line, in output order
    pub const HEADERS: [InnoDbSection; 12] = [
        InnoDbSection::BackgroundThread,
        InnoDbSection::Semaphores,
        InnoDbSection::LatestForeignKeyError,
        InnoDbSection::LatestDetectedDeadlock,
        InnoDbSection::Transactions,
        InnoDbSection::FileIo,
        InnoDbSection::InsertBufferAndAdaptiveHashIndex,
        InnoDbSection::Log,
        InnoDbSection::BufferPoolAndMemory,
        InnoDbSection::IndividualBufferPoolInfo,
        InnoDbSection::RowOperations,
        InnoDbSection::EndOfOutput,
    ];

    /// The header line that opens this section
    pub fn header(&self) -> &'static str {
        match self {
            InnoDbSection::Preamble => "",
            InnoDbSection::BackgroundThread => "BACKGROUND THREAD",
            InnoDbSection::Semaphores => "SEMAPHORES",
            InnoDbSection::LatestForeignKeyError => "LATEST FOREIGN KEY ERROR",
            InnoDbSection::LatestDetectedDeadlock => "LATEST DETECTED DEADLOCK",
            InnoDbSection::Transactions => "TRANSACTIONS",
            InnoDbSection::FileIo => "FILE I/O",
            InnoDbSection::InsertBufferAndAdaptiveHashIndex => {
                "INSERT BUFFER AND ADAPTIVE HASH INDEX"
            }
            InnoDbSection::Log => "LOG",
            InnoDbSection::BufferPoolAndMemory => "BUFFER POOL AND MEMORY",
            InnoDbSection::IndividualBufferPoolInfo => "INDIVIDUAL BUFFER POOL INFO",
            InnoDbSection::RowOperations => "ROW OPERATIONS",
            InnoDbSection::EndOfOutput => "END OF INNODB MONITOR OUTPUT",
        }
    }

    /// Recognize a header line. Only exact whole-line matches count.
    pub fn from_header(line: &str) -> Option<Self> {
        Self::HEADERS
            .into_iter()
            .find(|section| section.header() == line)
    }
}

/// Mutex counters from the SEMAPHORES section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnoDbCounters {
    pub mutex_spin_waits: u64,
    pub mutex_spin_rounds: u64,
    pub mutex_os_waits: u64,
}

/// Extract the mutex counters from an InnoDB monitor dump.
///
/// Only `Mutex spin waits N, rounds N, OS waits N` lines inside the
/// SEMAPHORES section are considered; the last such line wins. Counters
/// stay zero when the section or the line is missing.
pub fn parse_innodb_counters(text: &str) -> InnoDbCounters {
    let mut counters = InnoDbCounters::default();
    let mut section = InnoDbSection::Preamble;

    for line in text.lines() {
        if let Some(header) = InnoDbSection::from_header(line) {
            section = header;
            continue;
        }
        if section != InnoDbSection::Semaphores {
            continue;
        }
        if let Some(caps) = MUTEX_SPIN_WAITS.captures(line) {
            let number = |i: usize| caps[i].parse::<u64>().unwrap_or(0);
            counters = InnoDbCounters {
                mutex_spin_waits: number(1),
                mutex_spin_rounds: number(2),
                mutex_os_waits: number(3),
            };
        }
    }

    counters
}
