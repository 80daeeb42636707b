//! Shared utilities for the hosts.

pub mod frame_timing;
