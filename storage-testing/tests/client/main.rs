// SPDX-License-Identifier: GPL-3.0-only

//! Client behaviour against a scripted plugin

pub mod connection;
pub mod filesystem;
pub mod pool;
pub mod volume;
