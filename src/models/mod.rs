// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for masks and the photos they belong to.

pub mod annotation;
pub mod photo;
