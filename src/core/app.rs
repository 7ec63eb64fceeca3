use crate::core::{Greeter, Result, RunOutcome, RunState};
use crate::utils::error::{ErrorId, GreeterError};
use crate::utils::logger::DIAGNOSTICS_TARGET;
use std::future::Future;
use std::io::Write;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Instrument};

/// Runs the greeting once and turns the result into an exit code.
///
/// Failures fall into three tiers: [`GreeterError::Application`] gets a
/// sanitized message, an interruption exits with 130, and everything else is
/// reported as an unexpected error. Internal details only reach the log,
/// correlated with the console through an [`ErrorId`].
pub struct Application<G: Greeter> {
    greeter: G,
    dispatch: Dispatch,
    state: RunState,
    outcome: Option<RunOutcome>,
}

impl<G: Greeter> Application<G> {
    pub fn new(greeter: G, dispatch: Dispatch) -> Self {
        Self {
            greeter,
            dispatch,
            state: RunState::NotStarted,
            outcome: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the greeting, racing it against `interrupt`. The greeting goes to
    /// `out` and user-facing error lines to `err`.
    ///
    /// An application runs at most once; later calls return the first
    /// outcome without doing any work.
    pub async fn run<I, O, E>(&mut self, interrupt: I, out: &mut O, err: &mut E) -> RunOutcome
    where
        I: Future<Output = ()>,
        O: Write,
        E: Write,
    {
        let dispatch = self.dispatch.clone();
        self.run_once(interrupt, out, err)
            .with_subscriber(dispatch)
            .await
    }

    async fn run_once<I, O, E>(&mut self, interrupt: I, out: &mut O, err: &mut E) -> RunOutcome
    where
        I: Future<Output = ()>,
        O: Write,
        E: Write,
    {
        // Created here so the span belongs to the application's dispatch.
        let span = tracing::info_span!("run");
        self.run_in_span(interrupt, out, err).instrument(span).await
    }

    async fn run_in_span<I, O, E>(&mut self, interrupt: I, out: &mut O, err: &mut E) -> RunOutcome
    where
        I: Future<Output = ()>,
        O: Write,
        E: Write,
    {
        if self.state.is_terminal() {
            tracing::warn!("Application already ran (state: {:?}); not running again", self.state);
            return self.outcome.clone().unwrap_or(RunOutcome {
                state: self.state,
                error_id: None,
            });
        }

        self.transition(RunState::Running);
        tracing::info!("Application starting");

        let result = self.execute(interrupt, out).await;
        let outcome = report(result, err);

        self.transition(outcome.state);
        self.outcome = Some(outcome.clone());
        tracing::info!("Application shutdown");
        outcome
    }

    async fn execute<I, O>(&self, interrupt: I, out: &mut O) -> Result<String>
    where
        I: Future<Output = ()>,
        O: Write,
    {
        let greeting = tokio::select! {
            biased;
            _ = interrupt => return Err(GreeterError::Interrupted),
            result = self.greet() => result?,
        };

        writeln!(out, "{}", greeting)?;
        out.flush()?;
        tracing::info!("Greeting displayed: {}", greeting);
        Ok(greeting)
    }

    async fn greet(&self) -> Result<String> {
        async {
            tracing::info!("Executing greeting function");
            self.greeter.greet().await
        }
        .instrument(tracing::info_span!("greet"))
        .await
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn report<E: Write>(result: Result<String>, err: &mut E) -> RunOutcome {
    match result {
        Ok(_) => {
            tracing::info!("Application completed successfully");
            RunOutcome {
                state: RunState::Succeeded,
                error_id: None,
            }
        }
        Err(GreeterError::Interrupted) => {
            tracing::info!("Application interrupted by user");
            let _ = writeln!(err, "\n{}", GreeterError::Interrupted.user_friendly_message());
            RunOutcome {
                state: RunState::Cancelled,
                error_id: None,
            }
        }
        Err(e @ GreeterError::Application { .. }) => {
            tracing::error!(target: DIAGNOSTICS_TARGET, "{}", e);
            let _ = writeln!(err, "{}", e.user_friendly_message());
            let _ = writeln!(err, "Please check the log files for more details.");
            RunOutcome {
                state: RunState::FailedApplication,
                error_id: e.error_id().cloned(),
            }
        }
        Err(e) => {
            let error_id = match e.error_id() {
                Some(error_id) => {
                    tracing::error!(target: DIAGNOSTICS_TARGET, "{}", e);
                    error_id.clone()
                }
                None => {
                    let error_id = ErrorId::generate();
                    tracing::error!(
                        target: DIAGNOSTICS_TARGET,
                        "Unexpected error [{}]: {}",
                        error_id,
                        e
                    );
                    error_id
                }
            };
            tracing::debug!(
                target: DIAGNOSTICS_TARGET,
                "Unexpected error detail [{}]: {:?}",
                error_id,
                e
            );
            let _ = writeln!(err, "An unexpected error occurred. Error ID: {}", error_id);
            let _ = writeln!(err, "Please check the log files for more details.");
            RunOutcome {
                state: RunState::FailedUnexpected,
                error_id: Some(error_id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedGreeter;

    #[async_trait]
    impl Greeter for FixedGreeter {
        async fn greet(&self) -> Result<String> {
            Ok("Hi".to_string())
        }
    }

    fn silent_dispatch() -> Dispatch {
        Dispatch::new(tracing_subscriber::registry())
    }

    #[tokio::test]
    async fn test_run_transitions_to_succeeded() {
        let mut app = Application::new(FixedGreeter, silent_dispatch());
        assert_eq!(app.state(), RunState::NotStarted);

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = app
            .run(std::future::pending(), &mut out, &mut err)
            .await;

        assert_eq!(outcome.state, RunState::Succeeded);
        assert_eq!(app.state(), RunState::Succeeded);
        assert_eq!(String::from_utf8(out).unwrap(), "Hi\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_second_run_does_nothing() {
        let mut app = Application::new(FixedGreeter, silent_dispatch());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        app.run(std::future::pending(), &mut out, &mut err).await;

        let mut second_out = Vec::new();
        let outcome = app
            .run(std::future::pending(), &mut second_out, &mut err)
            .await;

        assert_eq!(outcome.state, RunState::Succeeded);
        assert!(second_out.is_empty());
    }

    struct RefusingGreeter;

    #[async_trait]
    impl Greeter for RefusingGreeter {
        async fn greet(&self) -> Result<String> {
            Err(GreeterError::application("audience not allowed"))
        }
    }

    #[tokio::test]
    async fn test_second_run_returns_first_outcome() {
        let mut app = Application::new(RefusingGreeter, silent_dispatch());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let first = app.run(std::future::pending(), &mut out, &mut err).await;

        let mut second_err = Vec::new();
        let second = app
            .run(std::future::pending(), &mut out, &mut second_err)
            .await;

        assert_eq!(first.state, RunState::FailedApplication);
        assert!(first.error_id.is_some());
        assert_eq!(second, first);
        assert!(second_err.is_empty());
    }

    #[test]
    fn test_report_unexpected_without_id_generates_one() {
        let mut err = Vec::new();
        let failure = GreeterError::InvalidConfig {
            field: "log_directory".to_string(),
            reason: "empty".to_string(),
        };

        let outcome = report(Err(failure), &mut err);

        assert_eq!(outcome.state, RunState::FailedUnexpected);
        let error_id = outcome.error_id.unwrap();
        assert!(String::from_utf8(err).unwrap().contains(error_id.as_str()));
    }
}
