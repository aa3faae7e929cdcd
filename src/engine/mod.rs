// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive selection engine: zoom, viewport metrics and selection tools.

pub mod selection;
pub mod session;
pub mod viewport;
pub mod zoom;
