// Application wiring: collaborators, HTTP server and lifecycle.

pub mod app;
pub mod server;
pub mod services;

pub use app::App;
pub use server::HttpServer;
pub use services::Services;
