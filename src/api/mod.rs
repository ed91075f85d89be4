//! API Module
//!
//! HTTP handlers and routing for the city explorer REST API.
//!
//! # Endpoints
//! - `GET /api/search?q=` - Aggregated city search
//! - `POST /auth/register`, `POST /auth/login` - Accounts and bearer tokens
//! - `POST|GET /api/favorites`, `DELETE /api/favorites/:id` - Saved places
//! - `GET /api/cache/stats` - Search cache statistics
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod favorites;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::CurrentUser;
pub use routes::create_router;
pub use state::AppState;
