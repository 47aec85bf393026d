// Shared configuration and contract helpers for the depth chart engine and
// its front ends.

pub mod config;
pub mod contract;
