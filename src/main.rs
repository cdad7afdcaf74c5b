mod auto_scaling_client;
mod error;
#[cfg(test)]
mod fake_lifecycle_hooks;
mod lifecycle_hook;
mod params;
mod reconciler;

use crate::auto_scaling_client::{AutoScalingHookClient, LifecycleHooks};
use crate::error::LifecycleHookError;
use crate::params::{HookParams, Intent};
use crate::reconciler::Reconciler;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Serialize)]
pub struct HookHandlerOutput {
    changed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(log_filter())
        .with_target(false)
        .without_time()
        .init();

    lambda_runtime::run(service_fn(lifecycle_hook_handler)).await
}

/// `RUST_LOG` when set, otherwise the reconciler's decisions at `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn lifecycle_hook_handler(event: LambdaEvent<Value>) -> Result<HookHandlerOutput, Error> {
    let LambdaEvent { payload, context } = event;
    match handle(payload).await {
        Ok(output) => Ok(output),
        Err(failure) => {
            let message = failure.failure_message();
            error!(request_id = %context.request_id, error = %message, "lifecycle hook reconciliation failed");
            Err(Error::from(message))
        }
    }
}

async fn handle(payload: Value) -> Result<HookHandlerOutput, LifecycleHookError> {
    let params = HookParams::from_event(payload)?;
    let intent = params.intent()?;
    let client = AutoScalingHookClient::new(params.region()?);
    reconcile(&Reconciler::new(client), &intent).await
}

async fn reconcile<C: LifecycleHooks>(
    reconciler: &Reconciler<C>,
    intent: &Intent,
) -> Result<HookHandlerOutput, LifecycleHookError> {
    let changed = reconciler.ensure(intent).await?;
    Ok(HookHandlerOutput { changed })
}
