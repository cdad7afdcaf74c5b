use crate::error::LifecycleHookError;
use crate::lifecycle_hook::{HookIdentity, HookSpec, RemoteHook};
use async_trait::async_trait;
use rusoto_autoscaling::{
    Autoscaling, AutoscalingClient, DeleteLifecycleHookType, DescribeLifecycleHooksType,
    PutLifecycleHookType,
};
use rusoto_core::Region;
use std::convert::TryFrom;
use tracing::debug;

/// The three Auto Scaling calls the reconciler needs.
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    /// Hooks of `group_name`, narrowed to `hook_name` when given.
    async fn describe_lifecycle_hooks(
        &self,
        group_name: &str,
        hook_name: Option<&str>,
    ) -> Result<Vec<RemoteHook>, LifecycleHookError>;

    /// Creates the hook or replaces its configuration.
    async fn put_lifecycle_hook(&self, spec: &HookSpec) -> Result<(), LifecycleHookError>;

    async fn delete_lifecycle_hook(&self, identity: &HookIdentity) -> Result<(), LifecycleHookError>;
}

pub struct AutoScalingHookClient {
    client: AutoscalingClient,
}

#[async_trait]
impl LifecycleHooks for AutoScalingHookClient {
    async fn describe_lifecycle_hooks(
        &self,
        group_name: &str,
        hook_name: Option<&str>,
    ) -> Result<Vec<RemoteHook>, LifecycleHookError> {
        let request = DescribeLifecycleHooksType {
            auto_scaling_group_name: group_name.to_string(),
            lifecycle_hook_names: hook_name.map(|name| vec![name.to_string()]),
        };
        debug!(group_name, ?hook_name, "describing lifecycle hooks");

        let answer = self.client.describe_lifecycle_hooks(request).await?;

        answer
            .lifecycle_hooks
            .unwrap_or_default()
            .into_iter()
            .map(RemoteHook::try_from)
            .collect()
    }

    async fn put_lifecycle_hook(&self, spec: &HookSpec) -> Result<(), LifecycleHookError> {
        debug!(hook = %spec.identity, "putting lifecycle hook");
        self.client
            .put_lifecycle_hook(PutLifecycleHookType::from(spec))
            .await?;
        Ok(())
    }

    async fn delete_lifecycle_hook(&self, identity: &HookIdentity) -> Result<(), LifecycleHookError> {
        debug!(hook = %identity, "deleting lifecycle hook");
        self.client
            .delete_lifecycle_hook(DeleteLifecycleHookType::from(identity))
            .await?;
        Ok(())
    }
}

impl AutoScalingHookClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(AutoscalingClient::new(region))
    }

    pub fn new_with_client(client: AutoscalingClient) -> Self {
        AutoScalingHookClient { client }
    }
}
