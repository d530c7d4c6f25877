//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blockpress;

/// Generate the static site
pub fn run(app: &Blockpress) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = app.store().load_all(app.config.include_drafts);
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(app)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
