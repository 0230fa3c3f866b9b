//! Choosing the best master for a clip and deciding whether to accept it.

use super::offset::{Comparison, MatchResult, OffsetFinder, PreparedSignal};
use super::types::{CandidateClip, MasterRecording, MasterState};
use crate::constants::{DEFAULT_EPSILON, DEFAULT_SAMPLE_RATE, DEFAULT_THRESHOLD};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Tunables of the matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Confidence must be strictly greater than this to accept a match.
    pub threshold: f64,
    /// Analysis sample rate in Hz shared by clips and masters.
    pub sample_rate: u32,
    /// Added to the standard deviation during standardization.
    pub epsilon: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_rate: DEFAULT_SAMPLE_RATE,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// The highest-scoring master for a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// Master file.
    pub master: PathBuf,
    /// Alignment and confidence against that master.
    pub result: MatchResult,
}

/// An accepted match, ready for extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance {
    /// Master to extract from.
    pub master: PathBuf,
    /// Start of the span within the master, in seconds.
    pub offset_secs: f64,
    /// Length of the span, in seconds.
    pub duration_secs: f64,
    /// Confidence of the match.
    pub confidence: f64,
}

/// Outcome of matching one clip.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// A master matched above the threshold.
    Accepted(Acceptance),
    /// No master matched well enough.
    Rejected {
        /// Best candidate seen, if any master could be scored.
        best: Option<BestMatch>,
    },
}

impl Decision {
    /// True for an accepted match.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Confidence of the best candidate, if any.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Accepted(acceptance) => Some(acceptance.confidence),
            Self::Rejected { best } => best.as_ref().map(|b| b.result.confidence),
        }
    }

    /// Master of the best candidate, if any.
    pub fn master(&self) -> Option<&std::path::Path> {
        match self {
            Self::Accepted(acceptance) => Some(&acceptance.master),
            Self::Rejected { best } => best.as_ref().map(|b| b.master.as_path()),
        }
    }
}

/// Pick the first candidate with the strictly highest confidence.
///
/// Candidates are visited in the order given. Failed comparisons and NaN
/// confidences never win; if nothing could be scored the result is `None`.
pub fn select_best<M, I>(candidates: I) -> Option<(M, MatchResult)>
where
    I: IntoIterator<Item = (M, Comparison)>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(M, MatchResult)>, (master, comparison)| {
            let Some(result) = comparison.result() else {
                return best;
            };
            let replace = best
                .as_ref()
                .is_none_or(|(_, current)| result.confidence > current.confidence);
            if replace { Some((master, result)) } else { best }
        })
}

/// Apply the acceptance rule: accept only when confidence exceeds `threshold`.
pub fn decide(best: Option<BestMatch>, threshold: f64, duration_secs: f64) -> Decision {
    match best {
        Some(best) if best.result.confidence > threshold => Decision::Accepted(Acceptance {
            master: best.master,
            offset_secs: best.result.offset_secs,
            duration_secs,
            confidence: best.result.confidence,
        }),
        best => Decision::Rejected { best },
    }
}

/// Matches clips against a set of masters.
#[derive(Debug)]
pub struct Matcher {
    config: MatchConfig,
    finder: OffsetFinder,
}

impl Matcher {
    /// Create a matcher with the given tunables.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            finder: OffsetFinder::with_epsilon(config.epsilon),
        }
    }

    /// Matcher tunables.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The offset finder used for every comparison.
    pub fn finder(&self) -> &OffsetFinder {
        &self.finder
    }

    /// Compare a clip with every master and decide on the best one.
    ///
    /// Masters are scanned in the order given. A comparison that fails is
    /// logged and can never be selected.
    pub fn match_clip(&self, clip: &CandidateClip, masters: &[MasterRecording]) -> Decision {
        let prepared = self.finder.prepare(&clip.signal).map_err(|e| e.to_string());

        let comparisons = masters.iter().map(|master| {
            let comparison = self.compare(prepared.as_ref(), master);
            match &comparison {
                Comparison::Scored(result) => debug!(
                    "{} vs {}: confidence {:.4} at {:.2}s",
                    clip.path.display(),
                    master.path.display(),
                    result.confidence,
                    result.offset_secs
                ),
                Comparison::Failed { reason } => warn!(
                    "Error processing {} vs {}: {reason}",
                    clip.path.display(),
                    master.path.display()
                ),
            }
            (master, comparison)
        });

        let best = select_best(comparisons).map(|(master, result)| {
            if master.overruns(result.offset_secs, clip.duration_secs) {
                debug!(
                    "{} at {:.2}s runs past the end of {}",
                    clip.path.display(),
                    result.offset_secs,
                    master.path.display()
                );
            }
            BestMatch {
                master: master.path.clone(),
                result,
            }
        });

        decide(best, self.config.threshold, clip.duration_secs)
    }

    fn compare(
        &self,
        clip: std::result::Result<&PreparedSignal, &String>,
        master: &MasterRecording,
    ) -> Comparison {
        let clip = match clip {
            Ok(clip) => clip,
            Err(reason) => {
                return Comparison::Failed {
                    reason: format!("clip unusable: {reason}"),
                };
            }
        };
        match &master.state {
            MasterState::Ready(signal) => self.finder.find_prepared(clip, signal).into(),
            MasterState::Unavailable { reason } => Comparison::Failed {
                reason: format!("master unavailable: {reason}"),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn scored(confidence: f64, offset_secs: f64) -> Comparison {
        Comparison::Scored(MatchResult {
            offset_samples: 0,
            offset_secs,
            confidence,
        })
    }

    #[test]
    fn test_select_best_takes_maximum() {
        let best = select_best(vec![
            ("a", scored(0.1, 1.0)),
            ("b", scored(0.5, 2.0)),
            ("c", scored(0.3, 3.0)),
        ])
        .unwrap();
        assert_eq!(best.0, "b");
        assert_eq!(best.1.offset_secs, 2.0);
    }

    #[test]
    fn test_select_best_first_maximum_wins_ties() {
        let best = select_best(vec![
            ("a", scored(0.2, 1.0)),
            ("b", scored(0.7, 2.0)),
            ("c", scored(0.7, 3.0)),
        ])
        .unwrap();
        assert_eq!(best.0, "b");
    }

    #[test]
    fn test_select_best_skips_failures() {
        let best = select_best(vec![
            (
                "broken",
                Comparison::Failed {
                    reason: "corrupt".to_string(),
                },
            ),
            ("quiet", scored(-0.4, 0.0)),
        ])
        .unwrap();
        assert_eq!(best.0, "quiet");
    }

    #[test]
    fn test_select_best_all_failed_is_none() {
        let best = select_best(vec![(
            "broken",
            Comparison::Failed {
                reason: "corrupt".to_string(),
            },
        )]);
        assert!(best.is_none());
        assert!(select_best(Vec::<(&str, Comparison)>::new()).is_none());
    }

    #[test]
    fn test_decide_threshold_is_strict() {
        let best = BestMatch {
            master: PathBuf::from("m.wav"),
            result: MatchResult {
                offset_samples: 0,
                offset_secs: 4.0,
                confidence: 0.01,
            },
        };
        let at_threshold = decide(Some(best.clone()), 0.01, 2.0);
        assert!(!at_threshold.is_accepted());

        let mut above = best;
        above.result.confidence = 0.01 + f64::EPSILON;
        let decision = decide(Some(above), 0.01, 2.0);
        assert!(decision.is_accepted());
        match decision {
            Decision::Accepted(acceptance) => {
                assert_eq!(acceptance.offset_secs, 4.0);
                assert_eq!(acceptance.duration_secs, 2.0);
            }
            Decision::Rejected { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_decide_without_candidates_rejects() {
        assert_eq!(decide(None, 0.01, 1.0), Decision::Rejected { best: None });
    }

    #[test]
    fn test_match_clip_with_no_masters_rejects() {
        let matcher = Matcher::new(MatchConfig::default());
        let clip = CandidateClip::new(
            "clip.wav",
            crate::audio::AudioSignal::new(vec![0.1, -0.2, 0.3], DEFAULT_SAMPLE_RATE),
            0.1,
        );
        let decision = matcher.match_clip(&clip, &[]);
        assert_eq!(decision, Decision::Rejected { best: None });
        assert!(decision.confidence().is_none());
    }
}
