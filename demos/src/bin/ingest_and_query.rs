use std::path::PathBuf;

use tracing_subscriber::FmtSubscriber;

use nephrag::{official_sources, RagPipeline, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let settings = Settings::from_env()?;
    let index_path = settings
        .index_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("./nephrag_index.json"));

    let pipeline = RagPipeline::builder()
        .with_settings(settings)
        .with_sources(official_sources()?)
        .build()?;

    println!("capabilities: {:?}", pipeline.capabilities());

    let report = pipeline.ingest().await?;
    println!(
        "loaded {} documents ({} real, {} fallbacks, {} failed, success rate {:.0}%)",
        report.documents.len(),
        report.succeeded,
        report.fallbacks,
        report.failed,
        report.success_rate() * 100.0
    );

    pipeline.save_index(&index_path).await?;
    println!("index saved to {}", index_path.display());

    let question = std::env::args().nth(1).unwrap_or_else(|| {
        "How does Nephio deploy O-RAN network functions?".to_string()
    });
    println!("\nquestion: {question}\n");

    let hits = pipeline.similarity_search(&question, 3).await?;
    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "#{} (score {:.3}) {}",
            rank + 1,
            hit.score,
            hit.document.source_url().unwrap_or("<unknown source>")
        );
    }

    let response = pipeline.query(&question).await;
    if response.success {
        println!("\nanswer from {}:\n{}", response.model, response.answer);
    } else if let Some(failure) = response.error {
        println!("\nquery failed ({:?}): {}", failure.kind, failure.message);
    }

    Ok(())
}

fn init_tracing() {
    let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
