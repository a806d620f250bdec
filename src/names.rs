/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/names.rs
*
* Object names and labels for the resources generated for a `LogStack`. The
* workload builders and the autoscaler builder both go through these helpers,
* which is what keeps an autoscaler's target pointing at the workload that
* actually exists.
*
* Functions:
* - `workload_name`: name of a component's StatefulSet or Deployment.
* - `autoscaler_name`: name of a component's HorizontalPodAutoscaler.
* - `component_labels`: the recommended app.kubernetes.io label set.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::components::Component;
use std::collections::BTreeMap;

pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

const APP_NAME: &str = "logstack";
const MANAGER_NAME: &str = "logstack-operator";

/// Name of the StatefulSet or Deployment running `component` for `stack`.
pub fn workload_name(component: Component, stack: &str) -> String {
    format!("{}-{}", stack, component.label())
}

/// Name of the HorizontalPodAutoscaler of `component`. Prefixed with the
/// stack name so that two stacks sharing a namespace never collide.
pub fn autoscaler_name(component: Component, stack: &str) -> String {
    format!("{}-{}-autoscaler", stack, component.label())
}

pub fn component_labels(component: Component, stack: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_NAME.to_string(), APP_NAME.to_string()),
        (LABEL_INSTANCE.to_string(), stack.to_string()),
        (LABEL_COMPONENT.to_string(), component.label().to_string()),
        (LABEL_MANAGED_BY.to_string(), MANAGER_NAME.to_string()),
    ])
}
