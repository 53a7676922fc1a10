//! First commit of a freshly materialized project

use crate::error::ScaffoldResult;
use crate::git::VersionControl;
use std::path::Path;

/// Title of the only commit a new project starts with
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial Commit";

/// Initialize a repository in `dest`, stage everything and commit it.
///
/// Stops at the first failing step. Nothing is rolled back: a failure after
/// `init` leaves the partial repository in place.
pub fn bootstrap<V: VersionControl>(vcs: &V, dest: &Path) -> ScaffoldResult<()> {
    vcs.init(dest)?;
    vcs.stage_all(dest)?;
    vcs.commit(dest, INITIAL_COMMIT_MESSAGE)?;
    tracing::debug!(dest = %dest.display(), "repository bootstrapped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&self, step: &'static str, dir: &Path) -> ScaffoldResult<()> {
            self.calls
                .borrow_mut()
                .push(format!("{} {}", step, dir.display()));
            if self.fail_on == Some(step) {
                return Err(ScaffoldError::VersionControlFailed {
                    step,
                    reason: "simulated".to_string(),
                });
            }
            Ok(())
        }
    }

    impl VersionControl for Recorder {
        fn probe(&self) -> ScaffoldResult<()> {
            Ok(())
        }

        fn init(&self, dir: &Path) -> ScaffoldResult<()> {
            self.record("init", dir)
        }

        fn stage_all(&self, dir: &Path) -> ScaffoldResult<()> {
            self.record("add", dir)
        }

        fn commit(&self, dir: &Path, message: &str) -> ScaffoldResult<()> {
            assert_eq!(message, INITIAL_COMMIT_MESSAGE);
            self.record("commit", dir)
        }
    }

    #[test]
    fn test_steps_run_in_order_inside_destination() {
        let vcs = Recorder::default();
        let dest = PathBuf::from("/work/my-app");

        bootstrap(&vcs, &dest).unwrap();

        assert_eq!(
            *vcs.calls.borrow(),
            vec![
                "init /work/my-app".to_string(),
                "add /work/my-app".to_string(),
                "commit /work/my-app".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_step_stops_the_sequence() {
        let vcs = Recorder {
            fail_on: Some("add"),
            ..Default::default()
        };

        let err = bootstrap(&vcs, Path::new("my-app")).unwrap_err();

        assert!(matches!(err, ScaffoldError::VersionControlFailed { step: "add", .. }));
        assert_eq!(vcs.calls.borrow().len(), 2);
    }
}
