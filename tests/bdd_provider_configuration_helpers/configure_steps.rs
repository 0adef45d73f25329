//! Step definitions that resolve, configure, and check outcomes.

use dockhand::config::ResolvedConfig;
use dockhand::config::schema::DEFAULT_HOST;
use dockhand::error::{ConfigError, EngineError, ProviderError};
use dockhand::provider::Provider;
use rstest_bdd_macros::{given, then, when};

use super::{ConfigureOutcome, ProviderState, StepResult, create_mock_env, explicit_config};

fn classify(result: Result<String, ProviderError>) -> ConfigureOutcome {
    match result {
        Ok(host) => ConfigureOutcome::Success(host),
        Err(ProviderError::Config(ConfigError::ConflictingOptions { first, second })) => {
            ConfigureOutcome::ConflictingOptions { first, second }
        }
        Err(error @ ProviderError::Engine(EngineError::ClientInit { .. })) => {
            ConfigureOutcome::ClientInit(error.to_string())
        }
        Err(error @ ProviderError::Engine(EngineError::DaemonUnreachable { .. })) => {
            ConfigureOutcome::DaemonUnreachable(error.to_string())
        }
        Err(error) => ConfigureOutcome::Other(error.to_string()),
    }
}

fn resolve(provider_state: &ProviderState) -> StepResult<ResolvedConfig> {
    let env = create_mock_env(provider_state)?;
    Ok(explicit_config(provider_state)?.resolve(&env))
}

fn outcome(provider_state: &ProviderState) -> StepResult<ConfigureOutcome> {
    provider_state
        .outcome
        .get()
        .ok_or_else(|| String::from("configure outcome should be set"))
}

// =============================================================================
// Given step definitions
// =============================================================================

/// Skip the scenario unless a daemon answers on the default socket.
#[given("a Docker daemon is listening on the default socket")]
#[expect(
    unused_variables,
    reason = "rstest-bdd requires parameter to match fixture name"
)]
pub fn daemon_is_listening(provider_state: &ProviderState) -> StepResult<()> {
    if let Err(error) = Provider::new().configure(&ResolvedConfig::for_host(DEFAULT_HOST)) {
        rstest_bdd::skip!("no Docker daemon available at {}: {}", DEFAULT_HOST, error);
    }
    Ok(())
}

// =============================================================================
// When step definitions
// =============================================================================

#[when("the configuration is resolved")]
pub fn configuration_is_resolved(provider_state: &ProviderState) -> StepResult<()> {
    let resolved = resolve(provider_state)?;
    provider_state.resolved_host.set(resolved.host);
    Ok(())
}

#[when("the provider is configured")]
pub fn provider_is_configured(provider_state: &ProviderState) -> StepResult<()> {
    let resolved = resolve(provider_state)?;
    let result = Provider::new()
        .configure(&resolved)
        .map(|handle| String::from(handle.host()));
    provider_state.outcome.set(classify(result));
    Ok(())
}

// =============================================================================
// Then step definitions
// =============================================================================

#[then("the resolved host is {host}")]
pub fn resolved_host_is(provider_state: &ProviderState, host: String) -> StepResult<()> {
    let resolved = provider_state
        .resolved_host
        .get()
        .ok_or("resolved host should be set")?;
    if resolved == host {
        Ok(())
    } else {
        Err(format!("expected host {host}, got {resolved}"))
    }
}

#[then("configuration fails with conflicting options {first} and {second}")]
pub fn fails_with_conflicting_options(
    provider_state: &ProviderState,
    first: String,
    second: String,
) -> StepResult<()> {
    match outcome(provider_state)? {
        ConfigureOutcome::ConflictingOptions {
            first: actual_first,
            second: actual_second,
        } if actual_first == first && actual_second == second => Ok(()),
        other => Err(format!(
            "expected ConflictingOptions({first}, {second}), got {other:?}"
        )),
    }
}

#[then("configuration fails with a client initialisation error")]
pub fn fails_with_client_init(provider_state: &ProviderState) -> StepResult<()> {
    match outcome(provider_state)? {
        ConfigureOutcome::ClientInit(_) => Ok(()),
        other => Err(format!("expected ClientInit, got {other:?}")),
    }
}

#[then("the error mentions {text}")]
pub fn error_mentions(provider_state: &ProviderState, text: String) -> StepResult<()> {
    let message = match outcome(provider_state)? {
        ConfigureOutcome::ClientInit(message)
        | ConfigureOutcome::DaemonUnreachable(message)
        | ConfigureOutcome::Other(message) => message,
        ConfigureOutcome::ConflictingOptions { first, second } => {
            format!("\"{first}\": conflicts with {second}")
        }
        ConfigureOutcome::Success(_) => {
            return Err(String::from("configure unexpectedly succeeded"));
        }
    };
    if message.contains(&text) {
        Ok(())
    } else {
        Err(format!("expected error to mention '{text}', got: {message}"))
    }
}

#[then("configuration fails because the daemon is unreachable")]
pub fn fails_with_daemon_unreachable(provider_state: &ProviderState) -> StepResult<()> {
    match outcome(provider_state)? {
        ConfigureOutcome::DaemonUnreachable(_) => Ok(()),
        other => Err(format!("expected DaemonUnreachable, got {other:?}")),
    }
}

#[then("configuration succeeds with a client handle for {host}")]
pub fn succeeds_with_handle(provider_state: &ProviderState, host: String) -> StepResult<()> {
    match outcome(provider_state)? {
        ConfigureOutcome::Success(actual) if actual == host => Ok(()),
        other => Err(format!("expected a client handle for {host}, got {other:?}")),
    }
}
