/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/crds.rs
*
* This file defines the Rust data structures for the `LogStack` Custom
* Resource Definition, the declarative description of a log stack that the
* autoscaler synthesis consumes.
*
* Architecture:
* - `LogStack` is generated by the `kube::CustomResource` derive macro from
*   `LogStackSpec`. The `#[kube(...)]` attribute MUST match the CRD manifest
*   installed in the cluster (group, version, kind).
* - `size` selects a row of the static size table (see `sizes.rs`); the
*   optional `template` overrides replica counts per component and carries the
*   optional `autoscaling` record that switches an autoscaler on.
* - `serde` attributes map between idiomatic Rust `snake_case` and idiomatic
*   Kubernetes `camelCase`.
* - `schemars` generates the OpenAPI v3 schema embedded into the CRD manifest
*   for server-side validation.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::components::Component;
use crate::error::{Error, Result};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- LogStack Custom Resource Definition ---

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    group = "logstack.io",
    version = "v1alpha1",
    kind = "LogStack",
    namespaced,
    printcolumn = r#"{"name":"Size", "type":"string", "jsonPath":".spec.size"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    shortname = "lstack"
)]
#[serde(rename_all = "camelCase")]
pub struct LogStackSpec {
    /// The t-shirt size of the stack. Selects the default replica counts.
    pub size: SizeTier,
    /// Per-component overrides on top of the size defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<LogStackTemplateSpec>,
}

impl LogStackSpec {
    /// The template entry of a component, if the user provided one.
    pub fn component(&self, component: Component) -> Option<&ComponentSpec> {
        self.template.as_ref().and_then(|t| t.get(component))
    }

    /// The replica count the user pinned for a component, if any.
    pub fn replicas(&self, component: Component) -> Option<i32> {
        self.component(component).and_then(|c| c.replicas)
    }

    /// The autoscaling override of a component. `None` means no autoscaler is
    /// built for it.
    pub fn autoscaling(&self, component: Component) -> Option<&AutoscalingSpec> {
        self.component(component).and_then(|c| c.autoscaling.as_ref())
    }
}

/// Cluster size classes, ordered by capacity.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
pub enum SizeTier {
    #[serde(rename = "1x.extra-small")]
    OneXExtraSmall,
    #[serde(rename = "1x.small")]
    OneXSmall,
    #[serde(rename = "1x.medium")]
    OneXMedium,
}

impl SizeTier {
    /// Every tier, from lowest to highest capacity.
    pub const ALL: [SizeTier; 3] = [
        SizeTier::OneXExtraSmall,
        SizeTier::OneXSmall,
        SizeTier::OneXMedium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeTier::OneXExtraSmall => "1x.extra-small",
            SizeTier::OneXSmall => "1x.small",
            SizeTier::OneXMedium => "1x.medium",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogStackTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingester: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querier: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_frontend: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_gateway: Option<ComponentSpec>,
}

impl LogStackTemplateSpec {
    pub fn get(&self, component: Component) -> Option<&ComponentSpec> {
        match component {
            Component::Ingester => self.ingester.as_ref(),
            Component::Querier => self.querier.as_ref(),
            Component::Distributor => self.distributor.as_ref(),
            Component::QueryFrontend => self.query_frontend.as_ref(),
            Component::Gateway => self.gateway.as_ref(),
            Component::IndexGateway => self.index_gateway.as_ref(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Pins the replica count, replacing the size table default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Enables a HorizontalPodAutoscaler for the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<AutoscalingSpec>,
}

/// Step sizes for the autoscaler of one component.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalingSpec {
    /// Percent of the current replicas that may be added per scale-up period.
    pub scale_up_percentage: i32,
    /// Percent of the current replicas that may be removed per scale-down period.
    pub scale_down_percentage: i32,
    /// Optional absolute number of pods that may be added per scale-up period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_up_pods: Option<i32>,
    /// Optional absolute number of pods that may be removed per scale-down period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_pods: Option<i32>,
}

impl AutoscalingSpec {
    /// Rejects step values the autoscaling API would refuse. Values are never
    /// clamped.
    pub fn validate(&self, component: Component) -> Result<()> {
        let steps = [
            ("scaleUpPercentage", Some(self.scale_up_percentage)),
            ("scaleDownPercentage", Some(self.scale_down_percentage)),
            ("scaleUpPods", self.scale_up_pods),
            ("scaleDownPods", self.scale_down_pods),
        ];
        for (field, value) in steps {
            if let Some(value) = value {
                if value <= 0 {
                    return Err(Error::InvalidAutoscaling {
                        component: component.to_string(),
                        reason: format!("{} must be greater than 0, got {}", field, value),
                    });
                }
            }
        }
        Ok(())
    }
}
