/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling/policy.rs
*
* This file builds the scaling policy of a single component.
*
* Architecture:
* - Everything the builder needs travels in one immutable `PolicyBuildRequest`
*   value. `build` is a pure function of that value: two equal requests yield
*   two equal descriptors.
* - Scale-up is tuned for fast growth: short periods and the `Max` select
*   policy, which applies whichever step allows the larger change.
* - Scale-down is conservative: long periods, a stabilization window, and the
*   `Min` select policy, which applies whichever step removes fewer pods.
* - The metric is average memory utilization, the resource that saturates
*   first on ingesters and queriers.
* - A `ScalingPolicyDescriptor` is never mutated after construction. Rendering
*   it into a Kubernetes object lives in `manifest.rs`.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::autoscaling::bounds::ReplicaBounds;
use crate::autoscaling::target::TargetRef;
use crate::components::Component;
use crate::config::PolicyDefaults;
use crate::crds::AutoscalingSpec;
use crate::names;
use std::collections::BTreeMap;
use std::time::Duration;

// --- Scaling Rules ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// `value` is a percentage of the current replica count.
    Percent,
    /// `value` is an absolute number of pods.
    Pods,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalingStep {
    pub kind: StepKind,
    pub value: i32,
    pub period: Duration,
}

/// Tie-break between steps that apply at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectPolicy {
    /// Most aggressive: the step allowing the larger replica change wins.
    Max,
    /// Least aggressive: the step allowing the smaller replica change wins.
    Min,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalingRules {
    pub steps: Vec<ScalingStep>,
    pub select_policy: SelectPolicy,
    pub stabilization_window: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricResource {
    Memory,
}

impl MetricResource {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricResource::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricTarget {
    pub resource: MetricResource,
    pub utilization_percent: i32,
}

// --- Descriptor ---

/// The computed autoscaling policy of one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingPolicyDescriptor {
    component: Component,
    name: String,
    namespace: String,
    labels: BTreeMap<String, String>,
    target_ref: TargetRef,
    bounds: ReplicaBounds,
    scale_up: ScalingRules,
    scale_down: ScalingRules,
    metric_target: MetricTarget,
}

impl ScalingPolicyDescriptor {
    pub fn component(&self) -> Component {
        self.component
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn target_ref(&self) -> &TargetRef {
        &self.target_ref
    }

    pub fn bounds(&self) -> ReplicaBounds {
        self.bounds
    }

    pub fn scale_up(&self) -> &ScalingRules {
        &self.scale_up
    }

    pub fn scale_down(&self) -> &ScalingRules {
        &self.scale_down
    }

    pub fn metric_target(&self) -> MetricTarget {
        self.metric_target
    }
}

// --- Builder ---

/// All inputs of `build`, gathered in one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBuildRequest {
    pub component: Component,
    pub stack: String,
    pub namespace: String,
    pub target: TargetRef,
    pub bounds: ReplicaBounds,
    pub autoscaling: AutoscalingSpec,
    pub defaults: PolicyDefaults,
}

pub fn build(request: &PolicyBuildRequest) -> ScalingPolicyDescriptor {
    let defaults = &request.defaults;
    let autoscaling = &request.autoscaling;

    let scale_up = scaling_rules(
        autoscaling.scale_up_percentage,
        autoscaling.scale_up_pods,
        defaults.scale_up_period_seconds,
        defaults.scale_up_stabilization_window_seconds,
        SelectPolicy::Max,
    );
    let scale_down = scaling_rules(
        autoscaling.scale_down_percentage,
        autoscaling.scale_down_pods,
        defaults.scale_down_period_seconds,
        defaults.scale_down_stabilization_window_seconds,
        SelectPolicy::Min,
    );

    ScalingPolicyDescriptor {
        component: request.component,
        name: names::autoscaler_name(request.component, &request.stack),
        namespace: request.namespace.clone(),
        labels: names::component_labels(request.component, &request.stack),
        target_ref: request.target.clone(),
        bounds: request.bounds,
        scale_up,
        scale_down,
        metric_target: MetricTarget {
            resource: MetricResource::Memory,
            utilization_percent: defaults.memory_utilization_percent,
        },
    }
}

fn scaling_rules(
    percent: i32,
    pods: Option<i32>,
    period_seconds: u16,
    stabilization_window_seconds: u16,
    select_policy: SelectPolicy,
) -> ScalingRules {
    let period = Duration::from_secs(u64::from(period_seconds));
    let mut steps = vec![ScalingStep {
        kind: StepKind::Percent,
        value: percent,
        period,
    }];
    if let Some(pods) = pods {
        steps.push(ScalingStep {
            kind: StepKind::Pods,
            value: pods,
            period,
        });
    }
    ScalingRules {
        steps,
        select_policy,
        stabilization_window: Duration::from_secs(u64::from(stabilization_window_seconds)),
    }
}
