//! Pluggable merge strategies.
//!
//! Provides the [`MergeStrategy`] trait and the ORT implementation — the
//! only strategy this two-way merge engine supports.

pub mod ort;

use git_hash::ObjectId;
use git_repository::Repository;

use crate::{MergeError, MergeOptions, MergeResult};

/// Trait for merge strategies.
///
/// Each strategy takes the two commit tips and their merge base, and produces
/// a [`MergeResult`] that is either clean (with a new tree) or conflicted.
pub trait MergeStrategy {
    /// Perform the merge.
    ///
    /// - `ours`: Our commit (current branch tip).
    /// - `theirs`: Their commit (branch being merged).
    /// - `base`: Common ancestor commit.
    fn merge(
        &self,
        repo: &mut Repository,
        ours: &ObjectId,
        theirs: &ObjectId,
        base: &ObjectId,
        options: &MergeOptions,
    ) -> Result<MergeResult, MergeError>;
}

/// Dispatch to the appropriate strategy based on options.
pub fn dispatch_merge(
    repo: &mut Repository,
    ours: &ObjectId,
    theirs: &ObjectId,
    base: &ObjectId,
    options: &MergeOptions,
) -> Result<MergeResult, MergeError> {
    use crate::MergeStrategyType;

    match options.strategy {
        MergeStrategyType::Ort => {
            let strategy = ort::OrtStrategy;
            strategy.merge(repo, ours, theirs, base, options)
        }
    }
}
