//! Write failures that only show up when standard output is closed.

use hello::{Context, Locale, Status};
use hello_testing::{CloseFailure, FailingLines, run_with};
use rstest::{fixture, rstest};

#[fixture]
fn ctx() -> Context { Context::new("hello", Locale::posix()) }

#[rstest]
#[case(&["hello"])]
#[case(&["hello", "-n"])]
#[case(&["hello", "--help"])]
#[case(&["hello", "--version"])]
fn failing_close_changes_exit_status(ctx: Context, #[case] args: &[&str]) {
    let run = run_with(&ctx, args, CloseFailure::default());
    assert_eq!(run.status, Status::Failure);
    assert!(!run.stdout.is_empty(), "writes themselves succeeded");
    assert_eq!(run.stderr, "hello: write error: No space left on device\n");
}

#[rstest]
fn full_device_fails_plain_greeting(ctx: Context) {
    let run = run_with(&ctx, &["hello"], FailingLines::all());
    assert_eq!(run.status, Status::Failure);
    assert!(run.stdout.is_empty());
    assert_eq!(run.stderr, "hello: write error: No space left on device\n");
}

#[rstest]
fn usage_error_is_not_masked_by_close(ctx: Context) {
    let run = run_with(&ctx, &["hello", "stray"], CloseFailure::default());
    assert_eq!(run.status, Status::Failure);
    assert_eq!(
        run.stderr,
        concat!(
            "hello: extra operand: stray\n",
            "Try 'hello --help' for more information.\n",
            "hello: write error: No space left on device\n",
        )
    );
}
