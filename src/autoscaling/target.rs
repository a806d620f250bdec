/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling/target.rs
*
* Resolves the workload an autoscaler scales. The kind must match the shape
* the component is deployed as: an autoscaler pointing at a Deployment while
* the component runs as a StatefulSet silently does nothing.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::components::Component;
use crate::names;
use std::fmt;

/// API version of every workload the operator deploys.
pub const WORKLOAD_API_VERSION: &str = "apps/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    StatefulSet,
    Deployment,
}

impl WorkloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkloadKind::StatefulSet => "StatefulSet",
            WorkloadKind::Deployment => "Deployment",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub kind: WorkloadKind,
    pub name: String,
}

/// The workload shape of a component. Only the ingester keeps local state.
pub fn workload_kind(component: Component) -> WorkloadKind {
    match component {
        Component::Ingester => WorkloadKind::StatefulSet,
        Component::Querier
        | Component::Distributor
        | Component::QueryFrontend
        | Component::Gateway
        | Component::IndexGateway => WorkloadKind::Deployment,
    }
}

pub fn resolve(component: Component, stack: &str) -> TargetRef {
    TargetRef {
        kind: workload_kind(component),
        name: names::workload_name(component, stack),
    }
}
