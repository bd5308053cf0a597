use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use stack_panel::credential::{
    obtain_and_apply, Credential, CredentialPrompt, GateOutcome, PrivilegeRunner,
};
use stack_panel::{AppError, Result};

/// Prompt replaying a fixed sequence of submissions (`None` = cancel).
struct ScriptedPrompt {
    submissions: VecDeque<Option<&'static str>>,
    calls: usize,
    seen_errors: Vec<Option<String>>,
}

impl ScriptedPrompt {
    fn new(submissions: &[Option<&'static str>]) -> Self {
        Self {
            submissions: submissions.iter().copied().collect(),
            calls: 0,
            seen_errors: Vec::new(),
        }
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn prompt(&mut self, last_error: Option<&str>) -> Result<Option<Credential>> {
        self.calls += 1;
        self.seen_errors.push(last_error.map(str::to_owned));
        let next = self.submissions.pop_front().unwrap_or(None);
        Ok(next.map(Credential::new))
    }
}

/// Runner failing a fixed number of times before succeeding.
struct FlakyRunner {
    failures: usize,
    calls: usize,
}

impl PrivilegeRunner for FlakyRunner {
    fn make_executable(&mut self, _secret: &Credential, _target: &Path) -> Result<()> {
        self.calls += 1;
        if self.calls <= self.failures {
            Err(AppError::Credential("incorrect password".into()))
        } else {
            Ok(())
        }
    }
}

/// Runner failing with a non-retryable error.
struct BrokenRunner {
    calls: usize,
}

impl PrivilegeRunner for BrokenRunner {
    fn make_executable(&mut self, _secret: &Credential, _target: &Path) -> Result<()> {
        self.calls += 1;
        Err(AppError::Io("sudo binary not found".into()))
    }
}

fn one_target() -> Vec<PathBuf> {
    vec![PathBuf::from(".sysStack/start.sh")]
}

#[test]
fn n_failures_then_success_take_n_plus_one_cycles() {
    let n = 3;
    let mut prompt = ScriptedPrompt::new(&[Some("a"), Some("b"), Some("c"), Some("d")]);
    let mut runner = FlakyRunner {
        failures: n,
        calls: 0,
    };

    let outcome = obtain_and_apply(&mut prompt, &mut runner, &one_target()).expect("gate runs");

    assert_eq!(outcome, GateOutcome::Granted);
    assert_eq!(prompt.calls, n + 1, "one prompt cycle per failure plus one");
    assert_eq!(runner.calls, n + 1, "one privileged call per cycle");
}

#[test]
fn immediate_cancel_performs_no_privileged_operation() {
    let mut prompt = ScriptedPrompt::new(&[None]);
    let mut runner = FlakyRunner {
        failures: 0,
        calls: 0,
    };

    let outcome = obtain_and_apply(&mut prompt, &mut runner, &one_target()).expect("gate runs");

    assert_eq!(outcome, GateOutcome::Cancelled);
    assert_eq!(runner.calls, 0);
    assert_eq!(prompt.calls, 1);
}

#[test]
fn cancel_after_failure_stops_retrying() {
    let mut prompt = ScriptedPrompt::new(&[Some("wrong"), None]);
    let mut runner = FlakyRunner {
        failures: usize::MAX,
        calls: 0,
    };

    let outcome = obtain_and_apply(&mut prompt, &mut runner, &one_target()).expect("gate runs");

    assert_eq!(outcome, GateOutcome::Cancelled);
    assert_eq!(prompt.calls, 2);
    assert_eq!(runner.calls, 1, "no privileged call after the cancellation");
}

#[test]
fn success_elevates_every_target_once() {
    let targets = vec![
        PathBuf::from("s/start.sh"),
        PathBuf::from("s/stop.sh"),
        PathBuf::from("s/start-debug.sh"),
    ];
    let mut prompt = ScriptedPrompt::new(&[Some("secret")]);
    let mut runner = FlakyRunner {
        failures: 0,
        calls: 0,
    };

    let outcome = obtain_and_apply(&mut prompt, &mut runner, &targets).expect("gate runs");

    assert_eq!(outcome, GateOutcome::Granted);
    assert_eq!(prompt.calls, 1);
    assert_eq!(runner.calls, targets.len());
}

#[test]
fn failure_detail_reaches_the_next_prompt() {
    let mut prompt = ScriptedPrompt::new(&[Some("wrong"), Some("right")]);
    let mut runner = FlakyRunner {
        failures: 1,
        calls: 0,
    };

    obtain_and_apply(&mut prompt, &mut runner, &one_target()).expect("gate runs");

    assert_eq!(prompt.seen_errors[0], None);
    assert_eq!(
        prompt.seen_errors[1].as_deref(),
        Some("incorrect password"),
        "second cycle shows the first failure's detail"
    );
}

#[test]
fn non_retryable_error_propagates() {
    let mut prompt = ScriptedPrompt::new(&[Some("secret"), Some("secret")]);
    let mut runner = BrokenRunner { calls: 0 };

    let err = obtain_and_apply(&mut prompt, &mut runner, &one_target())
        .expect_err("plumbing failure is not retried");

    assert!(matches!(err, AppError::Io(_)));
    assert_eq!(prompt.calls, 1);
    assert_eq!(runner.calls, 1);
}

#[test]
fn credential_debug_output_is_redacted() {
    let secret = Credential::new("hunter2");
    let rendered = format!("{secret:?}");
    assert_eq!(rendered, "Credential(<redacted>)");
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn credential_exposes_raw_secret_for_piping() {
    assert_eq!(Credential::new("hunter2").expose(), "hunter2");
}
