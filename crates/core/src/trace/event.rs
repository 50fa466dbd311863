//! Classified trace events.
//!
//! A [`TraceEvent`] is one annotated printout of the traced core, tagged with the
//! stage that produced it. Events borrow their text from the loaded log and are
//! never modified after classification.

use std::fmt;

/// Pipeline stage reported by one log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction fetched (in order).
    Fetch,
    /// Instruction decoded (in order).
    Decode,
    /// Instruction issued to a functional unit (out of order).
    Issue,
    /// Result written back (out of order).
    Complete,
    /// Instruction committed (in order).
    Retire,
    /// Store became visible to memory, reported after its retirement.
    StoreComp,
}

impl Stage {
    /// Keyword searched for in a raw line, also used as the stage name on output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Issue => "issue",
            Self::Complete => "complete",
            Self::Retire => "retire",
            Self::StoreComp => "store-comp",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified stage printout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent<'a> {
    /// Fetch sequence number of the instruction.
    pub fseq: u64,
    /// Stage that produced the printout.
    pub stage: Stage,
    /// One-based line number in the input.
    pub line_no: usize,
    /// The whole raw line, without its terminator.
    pub line: &'a str,
    /// Text following the sequence-number prefix, emitted verbatim.
    pub suffix: &'a str,
}
