use tokio::net::TcpListener;

use plainwiki::logger::Logger;
use plainwiki::{AppState, Config, PageStore, Templates, WikiError, router};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = Config::from_env();
    let store = PageStore::open(&config.pages_dir)?;
    let templates = Templates::load(config.templates_dir.as_deref())?;
    let state = AppState::new(store, templates, config.edit_fallback);

    let app = router(state);

    let addr = config.bind_addr();
    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
