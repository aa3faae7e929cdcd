// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: image decoding, clipping and the detection collaborator.

pub mod clip;
pub mod detect;
pub mod media;
