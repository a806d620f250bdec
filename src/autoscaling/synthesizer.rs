/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/autoscaling/synthesizer.rs
*
* Entry point of autoscaler synthesis, called once per reconciliation pass of
* a `LogStack`.
*
* Core Logic:
* - Components are visited in `Component::AUTOSCALED` order, so the output
*   order is stable across passes and the applier's diffs stay quiet.
* - A component without an `autoscaling` record is skipped. No placeholder is
*   emitted for it.
* - An `autoscaling` record on a component that cannot be autoscaled is
*   ignored with a warning.
* - Any invalid input, including invalid operator `PolicyDefaults`, aborts the
*   whole pass. A partially built list is never returned.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::autoscaling::bounds;
use crate::autoscaling::policy::{self, PolicyBuildRequest, ScalingPolicyDescriptor};
use crate::autoscaling::target;
use crate::components::Component;
use crate::config::{FeatureFlags, PolicyDefaults};
use crate::crds::{LogStack, LogStackSpec};
use crate::error::{Error, Result};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use tracing::{debug, info, warn};

/// Everything synthesis needs to know about one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Name of the `LogStack` resource.
    pub name: String,
    pub namespace: String,
    pub stack: LogStackSpec,
    pub flags: FeatureFlags,
    pub defaults: PolicyDefaults,
}

impl Options {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, stack: LogStackSpec) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            stack,
            flags: FeatureFlags::default(),
            defaults: PolicyDefaults::default(),
        }
    }

    /// Builds options from a `LogStack` read from the cluster.
    pub fn from_stack(stack: &LogStack, flags: FeatureFlags, defaults: PolicyDefaults) -> Result<Self> {
        let name = stack.metadata.name.clone().ok_or(Error::MissingMetadata("name"))?;
        let namespace = stack
            .metadata
            .namespace
            .clone()
            .ok_or(Error::MissingMetadata("namespace"))?;
        Ok(Self {
            name,
            namespace,
            stack: stack.spec.clone(),
            flags,
            defaults,
        })
    }
}

/// Computes the autoscaling policies of every autoscaled component of a stack.
pub fn synthesize(opts: &Options) -> Result<Vec<ScalingPolicyDescriptor>> {
    opts.defaults.validate()?;

    if !opts.flags.enable_horizontal_autoscaling {
        debug!(stack = %opts.name, "Horizontal autoscaling is disabled; no autoscalers built.");
        return Ok(Vec::new());
    }

    for component in Component::ALL {
        if !component.supports_autoscaling() && opts.stack.autoscaling(component).is_some() {
            warn!(
                stack = %opts.name,
                %component,
                "Component does not support autoscaling; ignoring its autoscaling settings."
            );
        }
    }

    let mut descriptors = Vec::with_capacity(Component::AUTOSCALED.len());
    for component in Component::AUTOSCALED {
        let Some(autoscaling) = opts.stack.autoscaling(component) else {
            debug!(stack = %opts.name, %component, "No autoscaling configured; skipping.");
            continue;
        };
        autoscaling.validate(component)?;

        let request = PolicyBuildRequest {
            component,
            stack: opts.name.clone(),
            namespace: opts.namespace.clone(),
            target: target::resolve(component, &opts.name),
            bounds: bounds::derive(&opts.stack, component, opts.defaults.bounds_policy)?,
            autoscaling: autoscaling.clone(),
            defaults: opts.defaults.clone(),
        };
        let descriptor = policy::build(&request);
        debug!(
            stack = %opts.name,
            %component,
            target = %descriptor.target_ref().name,
            min = descriptor.bounds().min(),
            max = descriptor.bounds().max(),
            "Built autoscaling policy."
        );
        descriptors.push(descriptor);
    }

    info!(
        stack = %opts.name,
        namespace = %opts.namespace,
        count = descriptors.len(),
        "Synthesized autoscaling policies."
    );
    Ok(descriptors)
}

/// `synthesize`, rendered into `autoscaling/v2` objects ready to apply.
pub fn build_horizontal_pod_autoscalers(opts: &Options) -> Result<Vec<HorizontalPodAutoscaler>> {
    Ok(synthesize(opts)?
        .iter()
        .map(ScalingPolicyDescriptor::to_horizontal_pod_autoscaler)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoscaling::policy::SelectPolicy;
    use crate::autoscaling::target::WorkloadKind;
    use crate::config::BoundsPolicy;
    use crate::crds::{AutoscalingSpec, ComponentSpec, LogStackTemplateSpec, SizeTier};
    use crate::names;
    use crate::sizes;
    use crate::test_support::init_tracing;

    fn autoscaling(up: i32, down: i32) -> AutoscalingSpec {
        AutoscalingSpec {
            scale_up_percentage: up,
            scale_down_percentage: down,
            scale_up_pods: None,
            scale_down_pods: None,
        }
    }

    fn component(autoscaling: Option<AutoscalingSpec>) -> Option<ComponentSpec> {
        Some(ComponentSpec {
            replicas: None,
            autoscaling,
        })
    }

    fn options(
        size: SizeTier,
        ingester: Option<AutoscalingSpec>,
        querier: Option<AutoscalingSpec>,
    ) -> Options {
        let stack = LogStackSpec {
            size,
            template: Some(LogStackTemplateSpec {
                ingester: component(ingester),
                querier: component(querier),
                distributor: component(None),
                ..Default::default()
            }),
        };
        Options::new("test", "test", stack)
    }

    #[test]
    fn test_extra_small_ingester_only() {
        init_tracing();
        let opts = options(SizeTier::OneXExtraSmall, Some(autoscaling(1, 1)), None);

        let descriptors = synthesize(&opts).unwrap();

        assert_eq!(descriptors.len(), 1);
        let ingester = &descriptors[0];
        assert_eq!(ingester.component(), Component::Ingester);
        assert_eq!(ingester.target_ref().kind, WorkloadKind::StatefulSet);
        assert_eq!(ingester.target_ref().name, "test-ingester");
        let tier_default = sizes::lookup(SizeTier::OneXExtraSmall).unwrap().get(Component::Ingester);
        assert_eq!(ingester.bounds().min(), tier_default);
        assert_eq!(ingester.bounds().max(), tier_default * 4);
    }

    #[test]
    fn test_ingester_and_querier() {
        init_tracing();
        let opts = options(SizeTier::OneXSmall, Some(autoscaling(100, 50)), Some(autoscaling(50, 10)));

        let descriptors = synthesize(&opts).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].component(), Component::Ingester);
        assert_eq!(descriptors[0].target_ref().kind, WorkloadKind::StatefulSet);
        assert_eq!(descriptors[1].component(), Component::Querier);
        assert_eq!(descriptors[1].target_ref().kind, WorkloadKind::Deployment);
        assert_ne!(descriptors[0].name(), descriptors[1].name());
        assert_ne!(descriptors[0].target_ref().name, descriptors[1].target_ref().name);
    }

    #[test]
    fn test_omitted_overrides_produce_nothing() {
        init_tracing();
        let opts = options(SizeTier::OneXMedium, None, None);
        assert!(synthesize(&opts).unwrap().is_empty());

        let opts = Options::new(
            "test",
            "test",
            LogStackSpec {
                size: SizeTier::OneXMedium,
                template: None,
            },
        );
        assert!(synthesize(&opts).unwrap().is_empty());

        let opts = options(SizeTier::OneXMedium, None, Some(autoscaling(10, 10)));
        let descriptors = synthesize(&opts).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].component(), Component::Querier);
    }

    #[test]
    fn test_targets_match_workload_names() {
        let opts = options(SizeTier::OneXSmall, Some(autoscaling(1, 1)), Some(autoscaling(1, 1)));
        for descriptor in synthesize(&opts).unwrap() {
            assert_eq!(
                descriptor.target_ref().name,
                names::workload_name(descriptor.component(), &opts.name)
            );
        }
    }

    #[test]
    fn test_select_policies_regardless_of_overrides() {
        for (up, down) in [(1, 1), (100, 50), (1000, 99)] {
            let opts = options(SizeTier::OneXSmall, Some(autoscaling(up, down)), Some(autoscaling(down, up)));
            for descriptor in synthesize(&opts).unwrap() {
                assert_eq!(descriptor.scale_up().select_policy, SelectPolicy::Max);
                assert_eq!(descriptor.scale_down().select_policy, SelectPolicy::Min);
            }
        }
    }

    #[test]
    fn test_bounds_hold_for_every_tier_and_policy() {
        for tier in SizeTier::ALL {
            for policy in [BoundsPolicy::default(), BoundsPolicy::TierRange] {
                let mut opts = options(tier, Some(autoscaling(1, 1)), Some(autoscaling(100, 100)));
                opts.defaults.bounds_policy = policy;
                for descriptor in synthesize(&opts).unwrap() {
                    assert!(descriptor.bounds().min() <= descriptor.bounds().max());
                }
            }
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let opts = options(SizeTier::OneXMedium, Some(autoscaling(100, 50)), Some(autoscaling(100, 50)));
        assert_eq!(synthesize(&opts).unwrap(), synthesize(&opts.clone()).unwrap());
    }

    #[test]
    fn test_disabled_feature_flag() {
        let mut opts = options(SizeTier::OneXSmall, Some(autoscaling(1, 1)), Some(autoscaling(1, 1)));
        opts.flags.enable_horizontal_autoscaling = false;
        assert!(synthesize(&opts).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_override_fails_whole_pass() {
        let opts = options(SizeTier::OneXSmall, Some(autoscaling(1, 1)), Some(autoscaling(0, 1)));
        let err = synthesize(&opts).unwrap_err();
        assert!(matches!(err, Error::InvalidAutoscaling { ref component, .. } if component == "querier"));
    }

    #[test]
    fn test_invalid_bounds_fail_whole_pass() {
        let mut opts = options(SizeTier::OneXSmall, Some(autoscaling(1, 1)), Some(autoscaling(1, 1)));
        if let Some(template) = opts.stack.template.as_mut() {
            template.querier = Some(ComponentSpec {
                replicas: Some(0),
                autoscaling: Some(autoscaling(1, 1)),
            });
        }
        assert!(matches!(
            synthesize(&opts).unwrap_err(),
            Error::InvalidReplicaBounds { ref component, min: 0, max: 0 } if component == "querier"
        ));
    }

    #[test]
    fn test_invalid_policy_defaults_fail_whole_pass() -> anyhow::Result<()> {
        let mut opts = options(SizeTier::OneXSmall, Some(autoscaling(100, 50)), Some(autoscaling(100, 50)));
        opts.defaults = serde_json::from_str(
            r#"{"memoryUtilizationPercent": -5, "scaleUpPeriodSeconds": 0, "scaleDownStabilizationWindowSeconds": 65535}"#,
        )?;
        assert!(matches!(
            build_horizontal_pod_autoscalers(&opts).unwrap_err(),
            Error::InvalidPolicyDefaults { .. }
        ));

        opts.defaults = PolicyDefaults {
            bounds_policy: BoundsPolicy::TierMultiplier { factor: 0 },
            ..Default::default()
        };
        assert_eq!(
            synthesize(&opts).unwrap_err(),
            Error::InvalidPolicyDefaults {
                field: "boundsPolicy.factor",
                reason: "must be at least 1, got 0".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_autoscaling_on_unsupported_component_is_ignored() {
        init_tracing();
        let mut opts = options(SizeTier::OneXSmall, None, Some(autoscaling(100, 50)));
        if let Some(template) = opts.stack.template.as_mut() {
            template.distributor = component(Some(autoscaling(100, 50)));
            template.gateway = component(Some(autoscaling(10, 10)));
        }
        let descriptors = synthesize(&opts).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].component(), Component::Querier);
        assert!(descriptors.iter().all(|d| d.component().supports_autoscaling()));
    }

    #[test]
    fn test_options_from_stack() -> anyhow::Result<()> {
        let manifest = r#"
apiVersion: logstack.io/v1alpha1
kind: LogStack
metadata:
  name: prod
  namespace: observability
spec:
  size: 1x.medium
  template:
    querier:
      replicas: 4
      autoscaling:
        scaleUpPercentage: 100
        scaleDownPercentage: 25
"#;
        let stack: LogStack = serde_yaml::from_str(manifest)?;
        let opts = Options::from_stack(&stack, FeatureFlags::default(), PolicyDefaults::default())?;
        assert_eq!(opts.name, "prod");
        assert_eq!(opts.namespace, "observability");

        let descriptors = synthesize(&opts)?;
        assert_eq!(descriptors.len(), 1);
        let querier = &descriptors[0];
        assert_eq!(querier.name(), "prod-querier-autoscaler");
        assert_eq!(querier.namespace(), "observability");
        assert_eq!(querier.target_ref().name, "prod-querier");
        assert_eq!(querier.bounds().min(), 4);
        assert_eq!(querier.bounds().max(), 16);
        Ok(())
    }

    #[test]
    fn test_options_from_stack_requires_namespace() {
        let stack = LogStack::new(
            "prod",
            LogStackSpec {
                size: SizeTier::OneXSmall,
                template: None,
            },
        );
        let err = Options::from_stack(&stack, FeatureFlags::default(), PolicyDefaults::default()).unwrap_err();
        assert_eq!(err, Error::MissingMetadata("namespace"));
    }

    #[test]
    fn test_build_horizontal_pod_autoscalers() {
        let opts = options(SizeTier::OneXSmall, Some(autoscaling(100, 50)), Some(autoscaling(100, 50)));
        let hpas = build_horizontal_pod_autoscalers(&opts).unwrap();
        let names: Vec<_> = hpas.iter().filter_map(|h| h.metadata.name.as_deref()).collect();
        assert_eq!(names, vec!["test-ingester-autoscaler", "test-querier-autoscaler"]);
    }
}
