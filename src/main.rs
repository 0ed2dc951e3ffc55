//! # vkpack CLI
//!
//! Command-line interface for the vkpack library.

use std::process;

use clap::Parser;

use vkpack::api::VkClient;
use vkpack::cli::Args;
use vkpack::config::Settings;
use vkpack::export::Exporter;
use vkpack::Result;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let selection = args.selection()?;
    let settings = Settings::from_env()?;

    println!("📦 vkpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💬 Peer:    {}", settings.peer_id);
    println!("📂 Backup:  {}", settings.backup_dir().display());
    println!("📄 Content: {}", describe(&args));
    println!();

    let client = VkClient::new(settings.token.clone());
    let summary = Exporter::new(&client, &settings, selection).run()?;

    println!();
    match &summary.output {
        Some(path) => {
            println!("✅ Done! Transcript saved to {}", path.display());
            println!();
            println!("📊 Summary:");
            println!("   Messages:  {}", summary.messages);
            println!("   Lines:     {}", summary.lines);
        }
        None => println!("⚠️  The chat has no messages, nothing was written"),
    }
    println!("⚡ Elapsed:   {:.2}s", summary.elapsed.as_secs_f64());

    Ok(())
}

fn describe(args: &Args) -> String {
    let mut classes = Vec::new();
    if args.text {
        classes.push("text");
    }
    if args.photo {
        classes.push("photos");
    }
    if args.doc {
        classes.push("documents");
    }
    classes.join(", ")
}
