/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/sizes.rs
*
* The stack size table: default replica counts per component for every size
* tier a `LogStack` may request. The table is built once, on first access, and
* is read-only afterwards, so concurrent reconcilers can consult it without
* synchronization. Only lookups are exported.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::components::Component;
use crate::crds::SizeTier;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Default replica count of every component for one size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentReplicas {
    pub ingester: i32,
    pub querier: i32,
    pub distributor: i32,
    pub query_frontend: i32,
    pub gateway: i32,
    pub index_gateway: i32,
}

impl ComponentReplicas {
    pub fn get(&self, component: Component) -> i32 {
        match component {
            Component::Ingester => self.ingester,
            Component::Querier => self.querier,
            Component::Distributor => self.distributor,
            Component::QueryFrontend => self.query_frontend,
            Component::Gateway => self.gateway,
            Component::IndexGateway => self.index_gateway,
        }
    }
}

// --- Size Table ---
static STACK_SIZE_TABLE: LazyLock<BTreeMap<SizeTier, ComponentReplicas>> = LazyLock::new(|| {
    let mut m = BTreeMap::new();
    m.insert(
        SizeTier::OneXExtraSmall,
        ComponentReplicas {
            ingester: 2,
            querier: 2,
            distributor: 2,
            query_frontend: 2,
            gateway: 2,
            index_gateway: 2,
        },
    );
    m.insert(
        SizeTier::OneXSmall,
        ComponentReplicas {
            ingester: 2,
            querier: 2,
            distributor: 2,
            query_frontend: 2,
            gateway: 2,
            index_gateway: 2,
        },
    );
    m.insert(
        SizeTier::OneXMedium,
        ComponentReplicas {
            ingester: 3,
            querier: 3,
            distributor: 2,
            query_frontend: 2,
            gateway: 2,
            index_gateway: 2,
        },
    );
    m
});

/// Returns the default replica counts of a tier.
pub fn lookup(tier: SizeTier) -> Result<&'static ComponentReplicas> {
    STACK_SIZE_TABLE
        .get(&tier)
        .ok_or_else(|| Error::UnknownSizeTier(tier.to_string()))
}

/// The lowest-capacity tier in the table.
pub fn smallest() -> SizeTier {
    SizeTier::ALL[0]
}

/// The highest-capacity tier in the table.
pub fn largest() -> SizeTier {
    SizeTier::ALL[SizeTier::ALL.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_is_defined() {
        for tier in SizeTier::ALL {
            let replicas = lookup(tier).unwrap();
            for component in Component::ALL {
                assert!(replicas.get(component) > 0, "{} has no replicas in {}", component, tier);
            }
        }
    }

    #[test]
    fn test_table_extremes() {
        assert_eq!(smallest(), SizeTier::OneXExtraSmall);
        assert_eq!(largest(), SizeTier::OneXMedium);
        assert_eq!(STACK_SIZE_TABLE.keys().next(), Some(&smallest()));
        assert_eq!(STACK_SIZE_TABLE.keys().next_back(), Some(&largest()));
        for tier in SizeTier::ALL {
            assert!(smallest() <= tier && tier <= largest(), "{} is outside the table ends", tier);
        }
    }

    #[test]
    fn test_medium_scales_ingestion_and_query_path() {
        let small = lookup(SizeTier::OneXSmall).unwrap();
        let medium = lookup(SizeTier::OneXMedium).unwrap();
        assert_eq!(medium.get(Component::Ingester), 3);
        assert_eq!(medium.get(Component::Querier), 3);
        assert!(medium.get(Component::Ingester) > small.get(Component::Ingester));
        assert_eq!(medium.get(Component::Gateway), small.get(Component::Gateway));
    }
}
