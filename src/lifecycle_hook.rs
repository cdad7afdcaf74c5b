use crate::error::LifecycleHookError;
use rusoto_autoscaling::{DeleteLifecycleHookType, LifecycleHook, PutLifecycleHookType};
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;

const TRANSITION_PREFIX: &str = "autoscaling:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Transition {
    InstanceLaunching,
    InstanceTerminating,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::InstanceLaunching => "autoscaling:EC2_INSTANCE_LAUNCHING",
            Transition::InstanceTerminating => "autoscaling:EC2_INSTANCE_TERMINATING",
        }
    }
}

impl TryFrom<String> for Transition {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim_start_matches(TRANSITION_PREFIX) {
            "EC2_INSTANCE_LAUNCHING" => Ok(Transition::InstanceLaunching),
            "EC2_INSTANCE_TERMINATING" => Ok(Transition::InstanceTerminating),
            _ => Err(format!("unknown lifecycle transition `{}`", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DefaultResult {
    Abandon,
    Continue,
}

impl DefaultResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultResult::Abandon => "ABANDON",
            DefaultResult::Continue => "CONTINUE",
        }
    }
}

impl Default for DefaultResult {
    fn default() -> Self {
        DefaultResult::Abandon
    }
}

/// A hook is unique per (group, name) within one account and region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookIdentity {
    pub group_name: String,
    pub hook_name: String,
}

impl HookIdentity {
    pub fn new(group_name: impl Into<String>, hook_name: impl Into<String>) -> Self {
        HookIdentity {
            group_name: group_name.into(),
            hook_name: hook_name.into(),
        }
    }
}

impl fmt::Display for HookIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.group_name, self.hook_name)
    }
}

impl From<&HookIdentity> for DeleteLifecycleHookType {
    fn from(identity: &HookIdentity) -> Self {
        DeleteLifecycleHookType {
            auto_scaling_group_name: identity.group_name.clone(),
            lifecycle_hook_name: identity.hook_name.clone(),
        }
    }
}

/// Desired state of a lifecycle hook. `None` members are left out of both the
/// comparison and the put request.
#[derive(Debug, Clone, PartialEq)]
pub struct HookSpec {
    pub identity: HookIdentity,
    pub transition: Transition,
    pub role_arn: Option<String>,
    /// `Some("")` clears the target on the remote hook.
    pub notification_target_arn: Option<String>,
    pub notification_metadata: Option<String>,
    pub heartbeat_timeout: Option<i64>,
    pub default_result: DefaultResult,
}

impl HookSpec {
    pub fn new(identity: HookIdentity, transition: Transition) -> Self {
        HookSpec {
            identity,
            transition,
            role_arn: None,
            notification_target_arn: None,
            notification_metadata: None,
            heartbeat_timeout: None,
            default_result: DefaultResult::default(),
        }
    }

    /// Names of the set fields whose value differs on `remote`.
    /// `GlobalTimeout` is computed by AWS and never compared.
    pub fn differences(&self, remote: &RemoteHook) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if remote.lifecycle_transition.as_deref() != Some(self.transition.as_str()) {
            fields.push("LifecycleTransition");
        }
        if !option_matches(self.role_arn.as_deref(), remote.role_arn.as_deref()) {
            fields.push("RoleARN");
        }
        let target_matches = match self.notification_target_arn.as_deref() {
            Some("") => remote.notification_target_arn.as_deref().map_or(true, str::is_empty),
            desired => option_matches(desired, remote.notification_target_arn.as_deref()),
        };
        if !target_matches {
            fields.push("NotificationTargetARN");
        }
        if !option_matches(
            self.notification_metadata.as_deref(),
            remote.notification_metadata.as_deref(),
        ) {
            fields.push("NotificationMetadata");
        }
        if !option_matches(self.heartbeat_timeout, remote.heartbeat_timeout) {
            fields.push("HeartbeatTimeout");
        }
        if remote.default_result.as_deref() != Some(self.default_result.as_str()) {
            fields.push("DefaultResult");
        }
        fields
    }
}

fn option_matches<T: PartialEq>(desired: Option<T>, remote: Option<T>) -> bool {
    desired.map_or(true, |desired| remote == Some(desired))
}

impl From<&HookSpec> for PutLifecycleHookType {
    fn from(spec: &HookSpec) -> Self {
        PutLifecycleHookType {
            auto_scaling_group_name: spec.identity.group_name.clone(),
            lifecycle_hook_name: spec.identity.hook_name.clone(),
            lifecycle_transition: Some(spec.transition.as_str().to_string()),
            role_arn: spec.role_arn.clone(),
            notification_target_arn: spec.notification_target_arn.clone(),
            notification_metadata: spec.notification_metadata.clone(),
            heartbeat_timeout: spec.heartbeat_timeout,
            default_result: Some(spec.default_result.as_str().to_string()),
        }
    }
}

/// Lifecycle hook as AWS currently reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteHook {
    pub identity: HookIdentity,
    pub lifecycle_transition: Option<String>,
    pub role_arn: Option<String>,
    pub notification_target_arn: Option<String>,
    pub notification_metadata: Option<String>,
    pub heartbeat_timeout: Option<i64>,
    pub global_timeout: Option<i64>,
    pub default_result: Option<String>,
}

impl TryFrom<LifecycleHook> for RemoteHook {
    type Error = LifecycleHookError;

    fn try_from(hook: LifecycleHook) -> Result<Self, Self::Error> {
        let group_name = hook
            .auto_scaling_group_name
            .ok_or(LifecycleHookError::NoneValue("AutoScalingGroupName"))?;
        let hook_name = hook
            .lifecycle_hook_name
            .ok_or(LifecycleHookError::NoneValue("LifecycleHookName"))?;
        Ok(RemoteHook {
            identity: HookIdentity::new(group_name, hook_name),
            lifecycle_transition: hook.lifecycle_transition,
            role_arn: hook.role_arn,
            notification_target_arn: hook.notification_target_arn,
            notification_metadata: hook.notification_metadata,
            heartbeat_timeout: hook.heartbeat_timeout,
            global_timeout: hook.global_timeout,
            default_result: hook.default_result,
        })
    }
}
