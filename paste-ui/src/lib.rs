pub mod api;
pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod lines;
pub mod notice;
pub mod save;
pub mod share;
pub mod theme;

#[cfg(test)]
mod test_support;

pub use api::*;
pub use bootstrap::*;
pub use config::*;
pub use lines::*;
pub use notice::*;
pub use save::*;
pub use share::*;
pub use theme::*;
