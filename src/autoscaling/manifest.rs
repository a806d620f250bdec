/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling/manifest.rs
*
* Renders a `ScalingPolicyDescriptor` into an `autoscaling/v2`
* HorizontalPodAutoscaler. The conversion is a pure value mapping; applying the
* object (server-side apply, diffing against the live resource) is the
* reconciler's job.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::autoscaling::policy::{ScalingPolicyDescriptor, ScalingRules, SelectPolicy, StepKind};
use crate::autoscaling::target::WORKLOAD_API_VERSION;
use k8s_openapi::api::autoscaling::v2::{
    CrossVersionObjectReference, HPAScalingPolicy, HPAScalingRules, HorizontalPodAutoscaler,
    HorizontalPodAutoscalerBehavior, HorizontalPodAutoscalerSpec, MetricSpec, MetricTarget,
    ResourceMetricSource,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::time::Duration;

const RESOURCE_METRIC_TYPE: &str = "Resource";
const UTILIZATION_TARGET_TYPE: &str = "Utilization";

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Percent => "Percent",
            StepKind::Pods => "Pods",
        }
    }
}

impl SelectPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectPolicy::Max => "Max",
            SelectPolicy::Min => "Min",
        }
    }
}

impl ScalingPolicyDescriptor {
    pub fn to_horizontal_pod_autoscaler(&self) -> HorizontalPodAutoscaler {
        let target = self.target_ref();
        let metric = self.metric_target();

        HorizontalPodAutoscaler {
            metadata: ObjectMeta {
                name: Some(self.name().to_string()),
                namespace: Some(self.namespace().to_string()),
                labels: Some(self.labels().clone()),
                ..Default::default()
            },
            spec: Some(HorizontalPodAutoscalerSpec {
                scale_target_ref: CrossVersionObjectReference {
                    api_version: Some(WORKLOAD_API_VERSION.to_string()),
                    kind: target.kind.as_str().to_string(),
                    name: target.name.clone(),
                },
                min_replicas: Some(self.bounds().min()),
                max_replicas: self.bounds().max(),
                behavior: Some(HorizontalPodAutoscalerBehavior {
                    scale_up: Some(scaling_rules(self.scale_up())),
                    scale_down: Some(scaling_rules(self.scale_down())),
                }),
                metrics: Some(vec![MetricSpec {
                    type_: RESOURCE_METRIC_TYPE.to_string(),
                    resource: Some(ResourceMetricSource {
                        name: metric.resource.as_str().to_string(),
                        target: MetricTarget {
                            type_: UTILIZATION_TARGET_TYPE.to_string(),
                            average_utilization: Some(metric.utilization_percent),
                            ..Default::default()
                        },
                    }),
                    ..Default::default()
                }]),
            }),
            status: None,
        }
    }
}

fn scaling_rules(rules: &ScalingRules) -> HPAScalingRules {
    HPAScalingRules {
        policies: Some(
            rules
                .steps
                .iter()
                .map(|step| HPAScalingPolicy {
                    type_: step.kind.as_str().to_string(),
                    value: step.value,
                    period_seconds: seconds(step.period),
                })
                .collect(),
        ),
        select_policy: Some(rules.select_policy.as_str().to_string()),
        stabilization_window_seconds: Some(seconds(rules.stabilization_window)),
        ..Default::default()
    }
}

// Rule durations are built from `u16` seconds and always fit.
fn seconds(duration: Duration) -> i32 {
    i32::try_from(duration.as_secs()).unwrap_or(i32::MAX)
}
