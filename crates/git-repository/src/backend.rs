//! Storage backend facade, re-exported from `git-utils` so it can be shared
//! with `git-loose`, `git-ref`, `git-index`, and `git-pack` without a
//! dependency cycle back through `git-repository`.

pub use git_utils::backend::*;
