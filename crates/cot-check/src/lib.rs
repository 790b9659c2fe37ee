//! COT Check: step verification and consistency analysis
//!
//! This crate verifies individual `(expression, result)` steps and analyzes
//! whole step sequences for internal consistency.
//!
//! # Example
//!
//! ```
//! use cot_check::ConsistencyAnalyzer;
//! use cot_core::StepSequence;
//!
//! let steps: StepSequence = vec![("2 + 3", 5.0), ("5 * 4", 21.0)].into_iter().collect();
//! let report = ConsistencyAnalyzer::default().analyze(&steps);
//!
//! assert_eq!(report.issues().len(), 1);
//! assert_eq!(report.consistency_score(), 80.0);
//! ```

pub mod analyzer;
pub mod profile;
pub mod recorder;
pub mod verifier;

pub use analyzer::ConsistencyAnalyzer;
pub use profile::ConsistencyProfile;
pub use recorder::{record, REASONING_ACK};
pub use verifier::{verify, verify_with};

use cot_core::{ConsistencyReport, StepSequence};

/// Analyze with the standard profile
pub fn analyze(sequence: &StepSequence) -> ConsistencyReport {
    ConsistencyAnalyzer::default().analyze(sequence)
}

/// Check if a sequence has no issues and no warnings
pub fn is_consistent(sequence: &StepSequence) -> bool {
    let report = analyze(sequence);
    report.issues().is_empty() && report.warnings().is_empty()
}
