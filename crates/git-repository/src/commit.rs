//! The commit engine: builds a tree from the index, assembles a commit
//! object, runs the commit hooks, optionally signs it, and advances the
//! target branch.

use bstr::{BString, ByteSlice};
use git_hash::ObjectId;
use git_object::{Commit, Object};
use git_ref::{RefName, RefTransaction, Reference};
use git_utils::date::{GitDate, Signature};

use crate::gpg::GpgSigner;
use crate::hooks::{HookRunner, HookType};
use crate::{RepoError, Repository};

/// Errors specific to constructing and recording a commit.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("committer identity unknown: set user.name and user.email")]
    MissingName,

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("cannot amend: branch has no commit yet")]
    NoCommit,

    #[error("cannot commit: unmerged paths remain in the index")]
    UnmergedPaths(Vec<BString>),

    #[error("hook '{hook}' failed with exit code {exit_code}")]
    HookFailed { hook: &'static str, exit_code: i32 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Input to [`commit`].
#[derive(Default)]
pub struct CommitOptions {
    pub message: Option<BString>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    pub parents: Option<Vec<ObjectId>>,
    pub tree: Option<ObjectId>,
    pub target_ref: Option<RefName>,
    pub amend: bool,
    pub dry_run: bool,
    pub no_update_branch: bool,
    pub sign: bool,
}

/// Outcome of a successful (non-dry-run) commit.
pub struct CommitResult {
    pub oid: ObjectId,
}

/// Build and record a commit, following the target ref's current tip (or
/// amending it), running the commit hooks, and updating the branch and
/// `HEAD` reflogs.
pub fn commit(repo: &mut Repository, opts: CommitOptions) -> Result<CommitResult, CommitError> {
    // Step 1: determine the target ref and default parents.
    let head_name = RefName::new("HEAD").map_err(RepoError::from)?;
    let head_ref = repo.refs().resolve(&head_name)?;

    let (target_ref, head_is_unborn, head_is_symbolic) = match &head_ref {
        Some(Reference::Symbolic { target, .. }) => {
            let unborn = repo.refs().resolve_to_oid(target)?.is_none();
            (target.clone(), unborn, true)
        }
        Some(Reference::Direct { .. }) => {
            return Err(CommitError::Repo(RepoError::InvalidHead(
                "cannot commit against a detached HEAD without an explicit target ref".into(),
            )));
        }
        None => {
            return Err(CommitError::Repo(RepoError::InvalidHead(
                "HEAD does not exist".into(),
            )));
        }
    };
    let target_ref = opts.target_ref.clone().unwrap_or(target_ref);

    let prior_oid = repo.refs().resolve_to_oid(&target_ref)?;

    let mut parents = match opts.parents {
        Some(p) => p,
        None => {
            if opts.amend {
                let prior = prior_oid.ok_or(CommitError::NoCommit)?;
                let prior_commit = load_commit(repo, &prior)?;
                prior_commit.parents
            } else if head_is_unborn {
                Vec::new()
            } else {
                prior_oid.into_iter().collect()
            }
        }
    };
    parents.dedup();

    // Step 2: normalize author/committer identity.
    let amended = if opts.amend {
        prior_oid.map(|oid| load_commit(repo, &oid)).transpose()?
    } else {
        None
    };

    let committer = resolve_identity(repo, opts.committer, amended.as_ref().map(|c| &c.committer))?;
    let author = resolve_identity(repo, opts.author, amended.as_ref().map(|c| &c.author))?;

    // Step 3: build the tree from the index under the repo's index lock.
    let tree = match opts.tree {
        Some(tree) => tree,
        None => {
            let unmerged: Vec<BString> = repo
                .index()?
                .conflicts()
                .into_iter()
                .map(BString::from)
                .collect();
            if !unmerged.is_empty() {
                return Err(CommitError::UnmergedPaths(unmerged));
            }
            repo.write_tree_from_index()
                .map_err(CommitError::Repo)?
        }
    };

    let message = opts
        .message
        .ok_or(CommitError::MissingParameter("message"))?;

    // Step 4: hooks. pre-commit, then prepare-commit-msg, then (after the
    // object is assembled but before writing) commit-msg.
    let hooks = HookRunner::new(repo);
    run_hook_checked(&hooks, HookType::PreCommit, &[], None)?;

    let mut message = message;
    if hooks.hook_exists(HookType::PrepareCommitMsg) {
        let result = hooks
            .run(HookType::PrepareCommitMsg, &[], Some(message.as_bytes()))
            .map_err(|e| CommitError::Repo(RepoError::Io(e)))?;
        if !result.success() {
            return Err(CommitError::HookFailed {
                hook: "prepare-commit-msg",
                exit_code: result.exit_code,
            });
        }
        if !result.stdout.is_empty() {
            message = BString::from(result.stdout);
        }
    }

    let committer_identity = committer.clone();
    let mut commit_obj = Commit {
        tree,
        parents: parents.clone(),
        author,
        committer,
        encoding: None,
        gpgsig: None,
        extra_headers: Vec::new(),
        message: message.clone(),
    };

    run_hook_checked(&hooks, HookType::CommitMsg, &[], Some(message.as_bytes()))?;

    // Step 5: optional signing.
    if opts.sign {
        let signer = GpgSigner::from_config(repo.config());
        let unsigned = Object::Commit(commit_obj.clone()).serialize_content();
        let signature = signer
            .sign(&unsigned)
            .map_err(|e| CommitError::Repo(RepoError::Io(e)))?;
        commit_obj.gpgsig = Some(BString::from(signature.signature));
    }

    // Step 6: write the commit object.
    let oid = repo
        .odb()
        .write(&Object::Commit(commit_obj))
        .map_err(|e| CommitError::Repo(RepoError::from(e)))?;

    if opts.dry_run {
        return Ok(CommitResult { oid });
    }

    if !opts.no_update_branch {
        let mut txn = RefTransaction::new();
        let reflog_message = format!("commit{}: {}", if opts.amend { " (amend)" } else { "" }, first_line(&message));

        if head_is_unborn {
            txn.create(target_ref.clone(), oid, reflog_message.clone());
            if head_is_symbolic {
                txn.set_symbolic(head_name.clone(), target_ref.clone(), reflog_message.clone());
            }
        } else {
            let old = prior_oid.unwrap_or(repo.hash_algo().null_oid());
            txn.update(target_ref.clone(), old, oid, reflog_message.clone());
        }

        repo.refs()
            .commit_transaction(txn)
            .map_err(|e| CommitError::Repo(RepoError::from(e)))?;

        if head_is_symbolic {
            let head_entry = git_ref::reflog::ReflogEntry {
                old_oid: prior_oid.unwrap_or(repo.hash_algo().null_oid()),
                new_oid: oid,
                identity: committer_identity.clone(),
                message: BString::from(reflog_message.as_str()),
            };
            let _ =
                git_ref::reflog::append_reflog_entry(repo.git_dir(), &head_name, &head_entry);
        }

        let _ = hooks.run(HookType::PostCommit, &[], None);
    }

    Ok(CommitResult { oid })
}

fn run_hook_checked(
    hooks: &HookRunner,
    hook: HookType,
    args: &[&str],
    stdin: Option<&[u8]>,
) -> Result<(), CommitError> {
    let result = hooks
        .run(hook, args, stdin)
        .map_err(|e| CommitError::Repo(RepoError::Io(e)))?;
    if !result.success() {
        return Err(CommitError::HookFailed {
            hook: hook.name(),
            exit_code: result.exit_code,
        });
    }
    Ok(())
}

fn load_commit(repo: &Repository, oid: &ObjectId) -> Result<Commit, CommitError> {
    match repo.odb().read(oid).map_err(|e| CommitError::Repo(RepoError::from(e)))? {
        Some(Object::Commit(c)) => Ok(c),
        _ => Err(CommitError::NoCommit),
    }
}

/// `caller > amended-commit field > config > current time`.
fn resolve_identity(
    repo: &Repository,
    caller: Option<Signature>,
    amended: Option<&Signature>,
) -> Result<Signature, CommitError> {
    if let Some(sig) = caller {
        return Ok(sig);
    }
    if let Some(sig) = amended {
        return Ok(sig.clone());
    }

    let name = repo
        .config()
        .get_string("user.name")
        .ok()
        .flatten()
        .ok_or(CommitError::MissingName)?;
    let email = repo
        .config()
        .get_string("user.email")
        .ok()
        .flatten()
        .unwrap_or_else(|| format!("{name}@localhost"));

    Ok(Signature {
        name: BString::from(name),
        email: BString::from(email),
        date: GitDate::now(),
    })
}

fn first_line(message: &BString) -> String {
    message
        .to_str_lossy()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
