#[cfg(feature = "ssr")]
pub mod server;
pub mod session;
