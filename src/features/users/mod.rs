//! User account feature for the crowdfunding platform.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/users` | No | Register a new account |
//! | POST | `/api/v1/sessions` | No | Login, returns a bearer token |
//! | POST | `/api/v1/email_checkers` | No | Check whether an email is still free |
//! | POST | `/api/v1/avatars` | Yes | Upload an avatar image |
//! | GET | `/api/v1/users/fetch` | Yes | Current user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;

pub use repositories::{PgUserRepository, UserRepository};
pub use services::UserService;
pub use state::UsersState;
