//! # newsroom-service
//!
//! Application layer for article reactions: services, the dependency
//! context, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    HealthChecks, HealthResponse, ReactionSummaryResponse, ReadinessResponse,
    SubmitReactionRequest, ToggleResponse, UserReactionResponse,
};
pub use services::{ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
