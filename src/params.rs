use crate::error::LifecycleHookError;
use crate::lifecycle_hook::{DefaultResult, HookIdentity, HookSpec, Transition};
use rusoto_core::Region;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Present,
    Absent,
}

impl Default for State {
    fn default() -> Self {
        State::Present
    }
}

/// Parameters carried by the invocation event.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookParams {
    #[serde(default)]
    pub state: State,
    pub lifecycle_hook_name: String,
    pub autoscaling_group_name: String,
    pub transition: Option<Transition>,
    pub role_arn: Option<String>,
    pub notification_target_arn: Option<String>,
    pub notification_meta_data: Option<String>,
    pub heartbeat_timeout: Option<i64>,
    #[serde(default)]
    pub default_result: DefaultResult,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Present(HookSpec),
    Absent(HookIdentity),
}

impl HookParams {
    pub fn from_event(event: serde_json::Value) -> Result<Self, LifecycleHookError> {
        Ok(serde_json::from_value(event)?)
    }

    pub fn intent(&self) -> Result<Intent, LifecycleHookError> {
        let identity = self.identity()?;
        match self.state {
            State::Absent => Ok(Intent::Absent(identity)),
            State::Present => {
                let transition = self
                    .transition
                    .ok_or(LifecycleHookError::MissingParameter("transition"))?;
                if let Some(timeout) = self.heartbeat_timeout {
                    if timeout <= 0 {
                        return Err(LifecycleHookError::InvalidParameter {
                            name: "heartbeat_timeout",
                            reason: format!("expected a positive number of seconds, got {}", timeout),
                        });
                    }
                }
                Ok(Intent::Present(HookSpec {
                    role_arn: non_empty(&self.role_arn),
                    notification_target_arn: self.notification_target_arn.clone(),
                    notification_metadata: non_empty(&self.notification_meta_data),
                    heartbeat_timeout: self.heartbeat_timeout,
                    default_result: self.default_result,
                    ..HookSpec::new(identity, transition)
                }))
            }
        }
    }

    /// Region to talk to: the event's `region`, otherwise rusoto's environment
    /// lookup. `endpoint_url` turns it into a custom region.
    pub fn region(&self) -> Result<Region, LifecycleHookError> {
        let region = match &self.region {
            Some(name) => {
                Region::from_str(name).map_err(|error| LifecycleHookError::InvalidParameter {
                    name: "region",
                    reason: error.to_string(),
                })?
            }
            None => Region::default(),
        };
        Ok(match &self.endpoint_url {
            Some(endpoint) => Region::Custom {
                name: region.name().to_string(),
                endpoint: endpoint.clone(),
            },
            None => region,
        })
    }

    fn identity(&self) -> Result<HookIdentity, LifecycleHookError> {
        if self.autoscaling_group_name.is_empty() {
            return Err(LifecycleHookError::InvalidParameter {
                name: "autoscaling_group_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.lifecycle_hook_name.is_empty() {
            return Err(LifecycleHookError::InvalidParameter {
                name: "lifecycle_hook_name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(HookIdentity::new(
            self.autoscaling_group_name.as_str(),
            self.lifecycle_hook_name.as_str(),
        ))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|value| !value.is_empty())
}
