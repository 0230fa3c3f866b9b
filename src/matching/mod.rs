//! Clip-to-master matching.
//!
//! Each clip is standardized and cross-correlated against every master; the
//! master with the highest normalized correlation peak is selected, and the
//! match is accepted only when that peak clears the configured threshold.

mod correlate;
mod offset;
mod selector;
mod standardize;
mod types;

pub use correlate::{Correlator, argmax, fast_len};
pub use offset::{Comparison, MatchResult, OffsetFinder, PreparedSignal};
pub use selector::{
    Acceptance, BestMatch, Decision, MatchConfig, Matcher, decide, select_best,
};
pub use standardize::standardize;
pub use types::{CandidateClip, MasterRecording, MasterState};
