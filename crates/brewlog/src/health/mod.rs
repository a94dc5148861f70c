//! Health module — liveness and service info endpoints.

pub mod route;
