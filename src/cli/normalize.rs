use larder::config::Config;
use larder_shopping::{build_normalizer, NameNormalizer};

pub fn normalize(config: Config, name: String, modifiers: Option<String>) -> anyhow::Result<()> {
    let normalizer = build_normalizer(
        config.normalizer.backend,
        config.normalizer.ollama_settings(),
    );

    let canonical = normalizer.normalize(&name, modifiers.as_deref());
    if canonical.is_empty() {
        tracing::warn!("{name:?} normalizes to nothing");
    }

    println!("{canonical}");

    Ok(())
}
