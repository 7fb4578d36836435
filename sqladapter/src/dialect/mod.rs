// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dialect registry and resolution
//!
//! Dialects are selected from a fixed, statically registered set of tags.
//! Unknown identities degrade to a generic dialect configured from the
//! driver info, so resolution never fails the caller.

pub mod descriptor;
pub mod product;
pub mod registry;

pub use descriptor::{Casing, DialectDescriptor, PaginationStyle, TimestampLiteral};
pub use product::DatabaseProduct;
pub use registry::{
    generic_dialect, global_resolver, lookup_dialect, registered_dialects, DialectResolution,
    DialectResolutionWarning, DialectResolver, ResolutionSource,
};
