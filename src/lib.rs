/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/lib.rs
*
* Autoscaling policy synthesis for the log stack operator. Given a `LogStack`
* specification, the crate computes the HorizontalPodAutoscaler policies of
* the components that scale horizontally (the ingester and the querier). It
* performs no I/O: the reconciliation loop applies the returned objects.
*
* Architecture:
* - `crds`: the `LogStack` custom resource the synthesis reads.
* - `components`, `sizes`, `names`: the closed component set, the static size
*   table and the shared naming helpers.
* - `config`: operator-level defaults and feature flags.
* - `autoscaling`: the synthesis pipeline itself.
*
* SPDX-License-Identifier: Apache-2.0
*/

pub mod autoscaling;
pub mod components;
pub mod config;
pub mod crds;
pub mod error;
pub mod names;
pub mod sizes;

#[cfg(test)]
mod test_support;

pub use autoscaling::{build_horizontal_pod_autoscalers, synthesize, Options, ScalingPolicyDescriptor};
pub use components::Component;
pub use crds::{LogStack, LogStackSpec, SizeTier};
pub use error::{Error, Result};
