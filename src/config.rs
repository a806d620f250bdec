/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/config.rs
*
* Operator-level settings for autoscaler synthesis. The defaults below are the
* values the operator ships with; an embedding operator may deserialize its
* own `PolicyDefaults` from its configuration and pass it through `Options`.
* Every field is optional in the serialized form and falls back to these
* constants.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::error::{Error, Result};
use serde::Deserialize;

pub const DEFAULT_SCALE_UP_PERIOD_SECONDS: u16 = 15;
pub const DEFAULT_SCALE_DOWN_PERIOD_SECONDS: u16 = 60;
pub const DEFAULT_SCALE_UP_STABILIZATION_WINDOW_SECONDS: u16 = 0;
pub const DEFAULT_SCALE_DOWN_STABILIZATION_WINDOW_SECONDS: u16 = 300;
/// Average memory utilization the autoscalers aim for.
pub const DEFAULT_MEMORY_UTILIZATION_PERCENT: i32 = 80;
/// `max = min * factor` under `BoundsPolicy::TierMultiplier`.
pub const DEFAULT_MAX_REPLICAS_FACTOR: i32 = 4;

/// Upper limits the autoscaling/v2 API accepts for rule periods and
/// stabilization windows.
pub const MAX_PERIOD_SECONDS: u16 = 1800;
pub const MAX_STABILIZATION_WINDOW_SECONDS: u16 = 3600;

/// Feature gates of the operator that affect autoscaler synthesis.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureFlags {
    pub enable_horizontal_autoscaling: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_horizontal_autoscaling: true,
        }
    }
}

/// How the replica range of an autoscaler is derived.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoundsPolicy {
    /// `min` is the component's replica count for the stack's tier (or the
    /// pinned template count), `max` is `min * factor`.
    TierMultiplier { factor: i32 },
    /// `min` and `max` are the component's counts in the smallest and largest
    /// size tiers, whatever tier the stack uses.
    TierRange,
}

impl Default for BoundsPolicy {
    fn default() -> Self {
        BoundsPolicy::TierMultiplier {
            factor: DEFAULT_MAX_REPLICAS_FACTOR,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyDefaults {
    pub scale_up_period_seconds: u16,
    pub scale_down_period_seconds: u16,
    pub scale_up_stabilization_window_seconds: u16,
    pub scale_down_stabilization_window_seconds: u16,
    pub memory_utilization_percent: i32,
    pub bounds_policy: BoundsPolicy,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            scale_up_period_seconds: DEFAULT_SCALE_UP_PERIOD_SECONDS,
            scale_down_period_seconds: DEFAULT_SCALE_DOWN_PERIOD_SECONDS,
            scale_up_stabilization_window_seconds: DEFAULT_SCALE_UP_STABILIZATION_WINDOW_SECONDS,
            scale_down_stabilization_window_seconds: DEFAULT_SCALE_DOWN_STABILIZATION_WINDOW_SECONDS,
            memory_utilization_percent: DEFAULT_MEMORY_UTILIZATION_PERCENT,
            bounds_policy: BoundsPolicy::default(),
        }
    }
}

impl PolicyDefaults {
    /// Rejects values the API server would refuse in a rendered autoscaler.
    pub fn validate(&self) -> Result<()> {
        check_period("scaleUpPeriodSeconds", self.scale_up_period_seconds)?;
        check_period("scaleDownPeriodSeconds", self.scale_down_period_seconds)?;
        check_window(
            "scaleUpStabilizationWindowSeconds",
            self.scale_up_stabilization_window_seconds,
        )?;
        check_window(
            "scaleDownStabilizationWindowSeconds",
            self.scale_down_stabilization_window_seconds,
        )?;
        if self.memory_utilization_percent <= 0 {
            return Err(invalid(
                "memoryUtilizationPercent",
                format!("must be positive, got {}", self.memory_utilization_percent),
            ));
        }
        if let BoundsPolicy::TierMultiplier { factor } = self.bounds_policy {
            if factor < 1 {
                return Err(invalid(
                    "boundsPolicy.factor",
                    format!("must be at least 1, got {}", factor),
                ));
            }
        }
        Ok(())
    }
}

fn check_period(field: &'static str, seconds: u16) -> Result<()> {
    if seconds == 0 || seconds > MAX_PERIOD_SECONDS {
        return Err(invalid(
            field,
            format!("must be between 1 and {}, got {}", MAX_PERIOD_SECONDS, seconds),
        ));
    }
    Ok(())
}

fn check_window(field: &'static str, seconds: u16) -> Result<()> {
    if seconds > MAX_STABILIZATION_WINDOW_SECONDS {
        return Err(invalid(
            field,
            format!("must not exceed {}, got {}", MAX_STABILIZATION_WINDOW_SECONDS, seconds),
        ));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidPolicyDefaults { field, reason }
}
