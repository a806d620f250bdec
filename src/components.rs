/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/components.rs
*
* The closed set of log stack components the operator deploys. Every name,
* label and size table entry is keyed by a `Component`, so an unrecognized
* component string is rejected here, at the boundary, instead of leaking into
* the autoscaler builder.
*
* SPDX-License-Identifier: Apache-2.0
*/

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    Ingester,
    Querier,
    Distributor,
    QueryFrontend,
    Gateway,
    IndexGateway,
}

impl Component {
    /// Every component, in declaration order.
    pub const ALL: [Component; 6] = [
        Component::Ingester,
        Component::Querier,
        Component::Distributor,
        Component::QueryFrontend,
        Component::Gateway,
        Component::IndexGateway,
    ];

    /// The horizontally scalable components. The order here is the order of
    /// the synthesized autoscaler list.
    pub const AUTOSCALED: [Component; 2] = [Component::Ingester, Component::Querier];

    /// The value used for the `app.kubernetes.io/component` label and as the
    /// suffix of generated object names.
    pub fn label(self) -> &'static str {
        match self {
            Component::Ingester => "ingester",
            Component::Querier => "querier",
            Component::Distributor => "distributor",
            Component::QueryFrontend => "query-frontend",
            Component::Gateway => "gateway",
            Component::IndexGateway => "index-gateway",
        }
    }

    pub fn supports_autoscaling(self) -> bool {
        Self::AUTOSCALED.contains(&self)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Component {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Component::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| Error::UnknownComponent(s.to_string()))
    }
}
