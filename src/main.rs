use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use busgraph::config::Settings;
use busgraph::output::{write_document, write_graph};
use busgraph::{Analysis, FileSource};

#[derive(Parser, Debug)]
#[command(name = "busgraph")]
#[command(about = "Derive a process topology graph and document from a pub/sub network snapshot")]
struct Args {
    /// Path to the snapshot JSON file
    #[arg(short, long, default_value = "snapshot.json")]
    file: PathBuf,

    /// Output name; ".json" and ".dot" are appended when missing
    #[arg(short, long)]
    output: Option<String>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip writing the JSON document
    #[arg(long)]
    no_document: bool,

    /// Skip writing the DOT graph
    #[arg(long)]
    no_graph: bool,

    /// Write the JSON document on a single line
    #[arg(long)]
    compact: bool,

    /// Omit node and edge labels from the graph
    #[arg(long)]
    no_labels: bool,
}

impl Args {
    /// Apply command-line flags on top of the loaded settings.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(ref output) = self.output {
            settings.output = output.clone();
        }
        if self.no_document {
            settings.write_document = false;
        }
        if self.no_graph {
            settings.write_graph = false;
        }
        if self.compact {
            settings.pretty = false;
        }
        if self.no_labels {
            settings.labels = false;
        }
        settings
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.apply(Settings::load(args.config.as_deref())?);

    let source = FileSource::new(&args.file);
    let snapshot = source.load()?;
    info!(
        "Loaded {} topic records and {} processes from {}",
        snapshot.topics.len(),
        snapshot.processes.len(),
        source.path().display()
    );

    let analysis = Analysis::of(&snapshot)?;
    let summary = analysis.summary();

    println!("Hosts:      {}", summary.hosts);
    println!(
        "Processes:  {} ({} publish, {} subscribe, {} both, {} idle)",
        summary.processes,
        summary.publishers_only,
        summary.subscribers_only,
        summary.both,
        summary.neither
    );
    println!("Topics:     {}", summary.topics);
    println!("Edges:      {}", summary.edges);
    if summary.type_conflicts > 0 {
        println!("Type conflicts suppressed: {}", summary.type_conflicts);
    }

    if settings.write_document {
        let path = write_document(&settings.output, &analysis.document, settings.pretty)?;
        println!("Exported document to: {}", path.display());
    }

    if settings.write_graph {
        let path = write_graph(&settings.output, &analysis.topology, settings.labels)?;
        println!("Exported graph to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "busgraph",
            "--output",
            "net",
            "--no-graph",
            "--compact",
        ]);
        let settings = args.apply(Settings::default());

        assert_eq!(settings.output, "net");
        assert!(!settings.write_graph);
        assert!(settings.write_document);
        assert!(!settings.pretty);
        assert!(settings.labels);
    }

    #[test]
    fn defaults_leave_settings_alone() {
        let args = Args::parse_from(["busgraph"]);
        assert_eq!(args.file, PathBuf::from("snapshot.json"));
        assert_eq!(args.apply(Settings::default()), Settings::default());
    }
}
