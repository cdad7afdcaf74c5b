use crate::auto_scaling_client::LifecycleHooks;
use crate::error::LifecycleHookError;
use crate::lifecycle_hook::{HookIdentity, HookSpec};
use crate::params::Intent;
use tracing::info;

/// Converges one lifecycle hook towards the requested state. Every call fetches
/// the remote state first and issues at most one kind of write.
pub struct Reconciler<C> {
    client: C,
}

impl<C: LifecycleHooks> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Reconciler { client }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn ensure(&self, intent: &Intent) -> Result<bool, LifecycleHookError> {
        match intent {
            Intent::Present(desired) => self.ensure_present(desired).await,
            Intent::Absent(identity) => self.ensure_absent(identity).await,
        }
    }

    /// Creates the hook, or updates it when a set field of `desired` differs.
    pub async fn ensure_present(&self, desired: &HookSpec) -> Result<bool, LifecycleHookError> {
        let identity = &desired.identity;
        let existing = self
            .client
            .describe_lifecycle_hooks(&identity.group_name, Some(identity.hook_name.as_str()))
            .await?
            .into_iter()
            .find(|hook| &hook.identity == identity);

        match existing {
            None => info!(hook = %identity, "creating lifecycle hook"),
            Some(remote) => {
                let differences = desired.differences(&remote);
                if differences.is_empty() {
                    info!(hook = %identity, "lifecycle hook unchanged");
                    return Ok(false);
                }
                info!(hook = %identity, fields = ?differences, "updating lifecycle hook");
            }
        }

        self.client.put_lifecycle_hook(desired).await?;
        Ok(true)
    }

    /// Deletes every hook of the group carrying the target name.
    pub async fn ensure_absent(&self, identity: &HookIdentity) -> Result<bool, LifecycleHookError> {
        let hooks = self
            .client
            .describe_lifecycle_hooks(&identity.group_name, None)
            .await?;

        let mut changed = false;
        for hook in hooks
            .iter()
            .filter(|hook| hook.identity.hook_name == identity.hook_name)
        {
            info!(hook = %hook.identity, "deleting lifecycle hook");
            self.client.delete_lifecycle_hook(&hook.identity).await?;
            changed = true;
        }
        if !changed {
            info!(hook = %identity, "lifecycle hook not found");
        }
        Ok(changed)
    }
}
