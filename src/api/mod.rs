pub mod client;
pub mod models;
pub mod traits;

pub use client::YouTubeClient;
pub use models::VideoId;
pub use traits::ChannelCatalog;
