// viewerscan services
// Services do the I/O around the tracker: fetching, extraction, rendering, settings, polling.

pub mod page_fetcher;
pub mod poll_loop;
pub mod renderer;
pub mod settings_engine;
pub mod viewer_extractor;
