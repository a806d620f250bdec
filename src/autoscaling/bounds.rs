/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling/bounds.rs
*
* Replica ranges for autoscalers. `ReplicaBounds` can only be constructed
* through `ReplicaBounds::new`, so every value in circulation satisfies
* `0 <= min <= max` and `max >= 1`. `derive` applies the configured `BoundsPolicy` to a
* stack specification.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::components::Component;
pub use crate::config::BoundsPolicy;
use crate::crds::LogStackSpec;
use crate::error::{Error, Result};
use crate::sizes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaBounds {
    min: i32,
    max: i32,
}

impl ReplicaBounds {
    pub fn new(component: Component, min: i32, max: i32) -> Result<Self> {
        // An autoscaler capped at zero replicas can never scale its target.
        if min < 0 || max < 1 || min > max {
            return Err(Error::InvalidReplicaBounds {
                component: component.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }
}

/// The replica count a component runs with: the pinned template value if
/// present, otherwise the size table default of the stack's tier.
pub fn effective_replicas(spec: &LogStackSpec, component: Component) -> Result<i32> {
    let replicas = match spec.replicas(component) {
        Some(replicas) => replicas,
        None => sizes::lookup(spec.size)?.get(component),
    };
    if replicas < 0 {
        return Err(Error::InvalidReplicaCount {
            component: component.to_string(),
            replicas,
        });
    }
    Ok(replicas)
}

pub fn derive(spec: &LogStackSpec, component: Component, policy: BoundsPolicy) -> Result<ReplicaBounds> {
    match policy {
        BoundsPolicy::TierMultiplier { factor } => {
            let min = effective_replicas(spec, component)?;
            let max = min.checked_mul(factor).ok_or_else(|| Error::InvalidReplicaCount {
                component: component.to_string(),
                replicas: min,
            })?;
            ReplicaBounds::new(component, min, max)
        }
        BoundsPolicy::TierRange => {
            let min = sizes::lookup(sizes::smallest())?.get(component);
            let max = sizes::lookup(sizes::largest())?.get(component);
            ReplicaBounds::new(component, min, max)
        }
    }
}
