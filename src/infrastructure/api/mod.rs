pub mod rest_client;
pub mod token;

pub use rest_client::RestRemoteGateway;
pub use token::{SharedTokenStore, StaticTokenProvider};
