use howsmynhs::labels::{format_number, short_label};
use howsmynhs::{Engine, EngineConfig};
use howsmynhs_mock::MockSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=howsmynhs=debug shows per-page spans when built with --features tracing.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Load every table from the source and build the engine.
    let engine = Engine::from_source(&MockSource::new(), EngineConfig::default()).await?;

    // 2. National headline.
    let national = engine.national_summary()?;
    println!(
        "{} has {} beds fewer than at the start ({:.1}%).",
        national.entity,
        format_number(-national.bed_change),
        -national.bed_change_pct
    );
    let d = &national.distribution;
    println!(
        "Across {} trusts: {:.0}% more, {:.0}% the same, {:.0}% fewer.",
        d.entities, d.more, d.same, d.fewer
    );

    // 3. Every page.
    let report = engine.build_pages().await;
    println!("\n## Pages ({}):", report.pages.len());
    for page in &report.pages {
        println!(" - {} -> {} {:?}", short_label(&page.name), page.url, page.blocks);
        if let Some(w) = &page.waiting {
            println!("     waiting: {:?} (rise {:.0})", w.trend, w.rise);
        }
        if let Some(b) = &page.beds {
            println!("     beds:    {:?} ({} -> {})", b.trend, b.earliest, b.latest);
        }
        if let Some(x) = &page.deaths {
            println!("     deaths:  {} total, {} recent", x.total, x.recent);
        }
    }
    for w in &report.warnings {
        eprintln!("warning: {}: {}", w.entity, w.error);
    }

    Ok(())
}
