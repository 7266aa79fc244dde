pub mod config;
pub mod frame_info;

pub use config::{AppConfig, ClientConfig, FrameConfig, PrepareConfig, ServerConfig};
pub use frame_info::{fingerprint, FormatInfo, FRAME_FORMAT_HEADER};
