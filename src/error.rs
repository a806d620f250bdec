/*
* Copyright (C) 2025 Pedro Henrique / phkaiser13
*
* File: src/error.rs
*
* Error type shared by every stage of autoscaler synthesis. None of these are
* retryable: they all point at a caller bug or at a stack specification that
* slipped past schema validation.
*
* SPDX-License-Identifier: Apache-2.0
*/

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown component '{0}'")]
    UnknownComponent(String),

    #[error("Size tier '{0}' is not present in the stack size table")]
    UnknownSizeTier(String),

    #[error("Invalid replica bounds for {component}: min {min} must be non-negative, max {max} must be positive, and min must not exceed max")]
    InvalidReplicaBounds {
        component: String,
        min: i32,
        max: i32,
    },

    #[error("Invalid replica count {replicas} for {component}")]
    InvalidReplicaCount { component: String, replicas: i32 },

    #[error("Invalid autoscaling configuration for {component}: {reason}")]
    InvalidAutoscaling { component: String, reason: String },

    #[error("Invalid policy default '{field}': {reason}")]
    InvalidPolicyDefaults { field: &'static str, reason: String },

    #[error("LogStack resource is missing metadata field '{0}'")]
    MissingMetadata(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
