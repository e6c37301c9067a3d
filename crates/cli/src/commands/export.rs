//! Export a stored page to a standalone HTML file.

use std::path::Path;

use tracing::info;

use jaki_core::{PageRepository, export_page};
use jaki_server::store::PageStore;

/// Render `page` ("home" or a page id) to `output`.
///
/// # Errors
///
/// Returns an error when the page is missing or the file cannot be written.
pub async fn run(
    data_dir: &Path,
    page: &str,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = PageStore::open(data_dir).await?;

    let page = if page.eq_ignore_ascii_case("home") {
        store
            .home_page()
            .await
            .ok_or("no pages exist yet; run `jaki-cli seed` first")?
    } else {
        store.get(page).await?
    };

    let html = export_page(&page.components);
    tokio::fs::write(output, &html).await?;

    info!(
        page_id = %page.id,
        output = %output.display(),
        bytes = html.len(),
        "page exported"
    );
    Ok(())
}
