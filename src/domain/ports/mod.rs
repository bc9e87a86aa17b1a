mod image_fetcher_port;
mod message_sink_port;

pub use image_fetcher_port::{FetchResult, ImageFetcherPort};
pub use message_sink_port::MessageSinkPort;
