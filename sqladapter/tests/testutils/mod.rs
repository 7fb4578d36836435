// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod scripted_driver;
pub mod sqlite_fixture;
