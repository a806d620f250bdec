/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling.rs
*
* HorizontalPodAutoscaler synthesis for the scalable components of a
* `LogStack`.
*
* Architecture:
* - `target`: resolves the workload (kind and name) an autoscaler scales.
* - `bounds`: derives the replica range under the configured `BoundsPolicy`.
* - `policy`: builds one immutable `ScalingPolicyDescriptor` from a
*   `PolicyBuildRequest`.
* - `synthesizer`: the per-stack entry point the reconciler calls.
* - `manifest`: renders descriptors into `autoscaling/v2` objects.
*
* SPDX-License-Identifier: Apache-2.0
*/

pub mod bounds;
pub mod manifest;
pub mod policy;
pub mod synthesizer;
pub mod target;

pub use bounds::{BoundsPolicy, ReplicaBounds};
pub use policy::{
    build, MetricResource, MetricTarget, PolicyBuildRequest, ScalingPolicyDescriptor, ScalingRules,
    ScalingStep, SelectPolicy, StepKind,
};
pub use synthesizer::{build_horizontal_pod_autoscalers, synthesize, Options};
pub use target::{resolve, TargetRef, WorkloadKind};
