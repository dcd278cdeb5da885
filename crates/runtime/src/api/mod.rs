//! Public runtime API surface.
//!
//! Error taxonomy, the JSON request/response contract, and transport-agnostic
//! handlers that turn service results into status-coded responses.

pub mod contract;
pub mod errors;
pub mod handlers;

pub use contract::{
    ApiBody, ApiResponse, BattleResponse, BattleResult, CreateBattleRequest, ErrorResponse,
    RankingResponse,
};
pub use errors::{ArenaError, Component, Result};
