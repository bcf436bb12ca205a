// HTTP middlewares applied around every controller.

pub mod error_middleware;
pub mod middleware;
pub mod recover_middleware;
pub mod timeout_middleware;
pub mod trace_middleware;

pub use error_middleware::ErrorFormatMiddleware;
pub use middleware::Middleware;
pub use recover_middleware::PanicRecoverMiddleware;
pub use timeout_middleware::RequestTimeoutMiddleware;
pub use trace_middleware::RequestTraceMiddleware;
