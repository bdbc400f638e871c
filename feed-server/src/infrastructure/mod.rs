pub mod config;
pub mod logging;
pub mod vk_oauth;
