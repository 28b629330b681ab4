//! Optimistic-concurrency precondition check.
//!
//! The guard is a pure decision over the caller-supplied version and the
//! stored version. It holds no lock and does no I/O; a race between two
//! writers that both pass the guard is caught by the repository's atomic
//! `update_if_version`.

use inventory_core::error::AppError;

/// What the mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A resource that does not exist yet.
    Create,
    /// An existing resource and the version currently stored for it.
    Update {
        /// Authoritative stored version.
        stored_version: i64,
    },
}

/// Outcome of the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The mutation may be attempted.
    Proceed,
    /// The caller's view is stale, or a create carried a version.
    Conflict,
}

/// Caller-supplied fields plus the optional version they assert.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<D> {
    /// New field values.
    pub draft: D,
    /// Asserted version; `None` skips the check on update.
    pub version: Option<i64>,
}

impl<D> Mutation<D> {
    /// A mutation asserting `version`.
    pub fn versioned(draft: D, version: i64) -> Self {
        Self {
            draft,
            version: Some(version),
        }
    }

    /// A mutation that asserts no version.
    pub fn unversioned(draft: D) -> Self {
        Self {
            draft,
            version: None,
        }
    }
}

/// Decides whether a mutation may proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencyGuard;

impl ConcurrencyGuard {
    /// Check `supplied` against `target`.
    ///
    /// | target | supplied | verdict |
    /// |--------|----------|---------|
    /// | create | none     | proceed |
    /// | create | some     | conflict |
    /// | update | none     | proceed (unchecked) |
    /// | update | some v   | proceed iff v == stored |
    pub fn check_and_advance(supplied: Option<i64>, target: Target) -> Verdict {
        match (target, supplied) {
            (Target::Create, None) => Verdict::Proceed,
            (Target::Create, Some(_)) => Verdict::Conflict,
            (Target::Update { .. }, None) => Verdict::Proceed,
            (Target::Update { stored_version }, Some(v)) if v == stored_version => {
                Verdict::Proceed
            }
            (Target::Update { .. }, Some(_)) => Verdict::Conflict,
        }
    }

    /// Like [`check_and_advance`](Self::check_and_advance), mapping a
    /// conflict to an error that names the resource.
    pub fn ensure(supplied: Option<i64>, target: Target, resource: &str) -> Result<(), AppError> {
        match Self::check_and_advance(supplied, target) {
            Verdict::Proceed => Ok(()),
            Verdict::Conflict => Err(match target {
                Target::Create => AppError::conflict(format!(
                    "A new {resource} must not carry a version."
                )),
                Target::Update { .. } => AppError::conflict(format!(
                    "Versions do not match. The {resource} was already modified."
                )),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::error::ErrorKind;

    fn samples() -> impl Iterator<Item = i64> {
        (0..2_000).chain([i64::MAX / 2, i64::MAX - 1])
    }

    #[test]
    fn test_create_without_version_always_proceeds() {
        assert_eq!(
            ConcurrencyGuard::check_and_advance(None, Target::Create),
            Verdict::Proceed
        );
    }

    #[test]
    fn test_create_with_version_always_conflicts() {
        for v in samples() {
            assert_eq!(
                ConcurrencyGuard::check_and_advance(Some(v), Target::Create),
                Verdict::Conflict
            );
        }
    }

    #[test]
    fn test_update_matching_version_proceeds() {
        for v in samples() {
            let target = Target::Update { stored_version: v };
            assert_eq!(
                ConcurrencyGuard::check_and_advance(Some(v), target),
                Verdict::Proceed
            );
        }
    }

    #[test]
    fn test_update_stale_version_conflicts() {
        for v in samples() {
            let ahead = Target::Update {
                stored_version: v + 1,
            };
            assert_eq!(
                ConcurrencyGuard::check_and_advance(Some(v), ahead),
                Verdict::Conflict
            );
            let behind = Target::Update {
                stored_version: v,
            };
            assert_eq!(
                ConcurrencyGuard::check_and_advance(Some(v + 1), behind),
                Verdict::Conflict
            );
        }
    }

    #[test]
    fn test_update_without_version_is_unchecked() {
        for v in samples() {
            let target = Target::Update { stored_version: v };
            assert_eq!(
                ConcurrencyGuard::check_and_advance(None, target),
                Verdict::Proceed
            );
        }
    }

    #[test]
    fn test_ensure_maps_conflict() {
        let err = ConcurrencyGuard::ensure(
            Some(0),
            Target::Update { stored_version: 1 },
            "product",
        )
        .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert!(err.message.contains("product"));
        assert!(ConcurrencyGuard::ensure(None, Target::Create, "product").is_ok());
    }
}
