//! In-memory stand-in for the Auto Scaling API used by tests.

use crate::auto_scaling_client::LifecycleHooks;
use crate::error::LifecycleHookError;
use crate::lifecycle_hook::{HookIdentity, HookSpec, RemoteHook};
use async_trait::async_trait;
use rusoto_autoscaling::{
    DeleteLifecycleHookError, DescribeLifecycleHooksError, PutLifecycleHookError,
};
use rusoto_core::RusotoError;
use std::sync::Mutex;

const DEFAULT_HEARTBEAT_TIMEOUT: i64 = 3600;
const GLOBAL_TIMEOUT_FACTOR: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Describe,
    Put,
    Delete,
}

#[derive(Default)]
pub struct FakeLifecycleHooks {
    hooks: Mutex<Vec<RemoteHook>>,
    calls: Mutex<Vec<Call>>,
    failing: Option<Call>,
}

impl FakeLifecycleHooks {
    pub fn with_hooks(hooks: Vec<RemoteHook>) -> Self {
        FakeLifecycleHooks {
            hooks: Mutex::new(hooks),
            ..Default::default()
        }
    }

    pub fn failing_on(call: Call, hooks: Vec<RemoteHook>) -> Self {
        FakeLifecycleHooks {
            failing: Some(call),
            ..Self::with_hooks(hooks)
        }
    }

    pub fn hooks(&self) -> Vec<RemoteHook> {
        self.hooks.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn find(&self, identity: &HookIdentity) -> Option<RemoteHook> {
        self.hooks()
            .into_iter()
            .find(|hook| &hook.identity == identity)
    }

    fn record(&self, call: Call) -> bool {
        self.calls.lock().unwrap().push(call);
        self.failing == Some(call)
    }
}

/// What AWS stores for a put: the server fills in the heartbeat default and
/// derives the global timeout.
pub fn stored_hook(spec: &HookSpec) -> RemoteHook {
    let heartbeat_timeout = spec.heartbeat_timeout.unwrap_or(DEFAULT_HEARTBEAT_TIMEOUT);
    RemoteHook {
        identity: spec.identity.clone(),
        lifecycle_transition: Some(spec.transition.as_str().to_string()),
        role_arn: spec.role_arn.clone(),
        notification_target_arn: spec
            .notification_target_arn
            .clone()
            .filter(|target| !target.is_empty()),
        notification_metadata: spec.notification_metadata.clone(),
        heartbeat_timeout: Some(heartbeat_timeout),
        global_timeout: Some(heartbeat_timeout * GLOBAL_TIMEOUT_FACTOR),
        default_result: Some(spec.default_result.as_str().to_string()),
    }
}

#[async_trait]
impl LifecycleHooks for FakeLifecycleHooks {
    async fn describe_lifecycle_hooks(
        &self,
        group_name: &str,
        hook_name: Option<&str>,
    ) -> Result<Vec<RemoteHook>, LifecycleHookError> {
        if self.record(Call::Describe) {
            return Err(RusotoError::Service(
                DescribeLifecycleHooksError::ResourceContentionFault("contention".to_string()),
            )
            .into());
        }
        Ok(self
            .hooks()
            .into_iter()
            .filter(|hook| hook.identity.group_name == group_name)
            .filter(|hook| hook_name.map_or(true, |name| hook.identity.hook_name == name))
            .collect())
    }

    async fn put_lifecycle_hook(&self, spec: &HookSpec) -> Result<(), LifecycleHookError> {
        if self.record(Call::Put) {
            return Err(RusotoError::Service(PutLifecycleHookError::LimitExceededFault(
                "limit exceeded".to_string(),
            ))
            .into());
        }
        let mut hooks = self.hooks.lock().unwrap();
        hooks.retain(|hook| hook.identity != spec.identity);
        hooks.push(stored_hook(spec));
        Ok(())
    }

    async fn delete_lifecycle_hook(&self, identity: &HookIdentity) -> Result<(), LifecycleHookError> {
        if self.record(Call::Delete) {
            return Err(RusotoError::Service(
                DeleteLifecycleHookError::ResourceContentionFault("contention".to_string()),
            )
            .into());
        }
        let mut hooks = self.hooks.lock().unwrap();
        if let Some(position) = hooks.iter().position(|hook| &hook.identity == identity) {
            hooks.remove(position);
        }
        Ok(())
    }
}
