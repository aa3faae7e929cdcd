// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pure geometry helpers.

pub mod geometry;
pub mod hit_test;
