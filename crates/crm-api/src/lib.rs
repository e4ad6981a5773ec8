//! HTTP resource API for the crm system.
//!
//! Each record kind is exposed under `/api/<collection>` with the same five
//! routes, produced by one generic router over [`ResourceService`]:
//!
//! | Method | Path    | Success              | Failure         |
//! |--------|---------|----------------------|-----------------|
//! | GET    | `/`     | 200, newest first    | 500             |
//! | POST   | `/`     | 201, created record  | 400             |
//! | GET    | `/{id}` | 200                  | 404             |
//! | PUT    | `/{id}` | 200, updated record  | 400, 404        |
//! | DELETE | `/{id}` | 200, `{message}`     | 404, 500        |

pub mod error;
pub mod routes;
pub mod server;
pub mod service;

pub use error::ApiError;
pub use routes::{create_router, resource_router};
pub use server::{serve, serve_with_shutdown, shutdown_signal};
pub use service::ResourceService;
