//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Generate the static site into the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(
        site.content_api()?,
        site.pages()?,
        &site.base_url(),
        &site.public_dir,
    );
    let stats = generator.generate().await?;

    tracing::info!(
        "Generated {} files ({} posts) in {:.2}s",
        stats.files,
        stats.posts,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
