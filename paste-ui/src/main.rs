use dioxus_logger::tracing::error;

use paste_ui::{page_config, start};

fn main() {
    let config = page_config();

    // Initialize logging for WASM
    dioxus_logger::init(config.log_level()).ok();

    if let Err(e) = start(config) {
        error!("Failed to wire page: {}", e);
    }
}
