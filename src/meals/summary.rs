use serde::Serialize;

use crate::meals::repo::Diet;

/// Diet-adherence aggregate over one session's records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub inside: u64,
    pub outside: u64,
    #[serde(rename = "bestSequence")]
    pub best_sequence: u64,
}

/// Single pass over the flags in retrieval order. An out-of-diet entry
/// resets the running streak to zero; the best value only ever increases.
pub fn summarize(flags: &[Diet]) -> Summary {
    let mut summary = Summary::default();
    let mut streak = 0;

    for flag in flags {
        summary.total += 1;
        match flag {
            Diet::Yes => {
                summary.inside += 1;
                streak += 1;
            }
            Diet::No => {
                summary.outside += 1;
                streak = 0;
            }
        }
        if streak > summary.best_sequence {
            summary.best_sequence = streak;
        }
    }

    summary
}
