//! Session Tool CLI
//!
//! 세션 분석 → zone 통계
//! 합성 세션 데이터 생성
//! 헤드리스 추격 시뮬레이션

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "session_tool")]
#[command(about = "Analyze, generate and simulate chase sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Summarize a sessions file (scores, outcomes, zone histogram)
    Analyze {
        /// Sessions JSON file
        #[arg(long)]
        sessions: PathBuf,

        /// Write the summary JSON here instead of only printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate synthetic sessions
    Generate {
        /// Output sessions JSON file
        #[arg(long)]
        out: PathBuf,

        /// Number of sessions
        #[arg(long, default_value = "5")]
        count: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run one level headless with scripted input
    Simulate {
        /// Campus level (1-4)
        #[arg(long, default_value = "1")]
        level: u32,

        /// Tick limit
        #[arg(long, default_value = "3600")]
        ticks: u32,

        /// Sessions file used for the zone bias (and for --append)
        #[arg(long)]
        sessions: Option<PathBuf>,

        /// Engine config override (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Jump every N ticks (0 = never)
        #[arg(long, default_value = "40")]
        jump_every: u32,

        /// Append the resulting session record to --sessions
        #[arg(long, default_value = "false")]
        append: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { sessions, out } => {
            println!("📊 Analyzing sessions...");
            println!("   Input: {}", sessions.display());

            let cfg = chase_core::EngineConfig::default();
            let summary = session_tool::analyze_file(&sessions, &cfg.zone)?;

            print_summary(&summary);

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&summary)
                    .context("Failed to serialize summary")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write summary: {}", path.display()))?;
                println!("\n📄 Summary saved to: {}", path.display());
            }
        }

        Commands::Generate { out, count, seed } => {
            println!("🎲 Generating {} synthetic sessions (seed {})...", count, seed);
            let records = session_tool::generate_sessions(count, seed, chrono::Utc::now());
            session_tool::write_sessions(&out, &records)?;
            println!("✅ Wrote {}", out.display());
        }

        Commands::Simulate { level, ticks, sessions, config, jump_every, append } => {
            if append && sessions.is_none() {
                anyhow::bail!("--append needs --sessions");
            }

            let cfg = session_tool::load_config(config.as_deref())?;
            let bias = session_tool::zone_bias_from_file(sessions.as_deref(), &cfg.zone);

            println!("🏃 Simulating level {} for up to {} ticks...", level, ticks);
            println!(
                "   Adversary: {}",
                chase_core::engine::telemetry::intelligence_label(bias.has_statistics())
            );

            let script = session_tool::Script { jump_every };
            let (summary, mut record) = session_tool::run_scripted(level, ticks, cfg, bias, script)?;

            println!("\n✅ Run finished");
            println!("   Outcome:   {}", summary.outcome.label());
            println!("   Ticks:     {} ({:.1}s)", summary.ticks, summary.ticks as f32 / 60.0);
            println!("   Score:     {}", summary.score);
            println!("   Items:     {}", summary.items_collected);
            println!("   Lives:     {}", summary.lives_left);
            println!("   Threat:    max {} / avg {:.1}", summary.max_threat, summary.average_threat);

            if let (true, Some(path)) = (append, sessions) {
                record.timestamp = Some(session_tool::session_timestamp(chrono::Utc::now()));
                let total = session_tool::append_session(&path, record)?;
                println!("\n📄 Appended to {} ({} sessions)", path.display(), total);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &chase_core::SessionSummary) {
    if summary.is_empty() {
        println!("\n⚠️  No session data available");
        return;
    }
    println!("\n✅ {} sessions", summary.total_sessions);
    println!("   Average score: {:.1}", summary.average_score);
    println!("   Median score:  {:.1}", summary.median_score);
    println!("   Min / max:     {} / {}", summary.min_score, summary.max_score);
    println!("   Std dev:       {:.1}", summary.score_std_dev);
    println!("   Avg threat:    {:.1}", summary.average_threat);
    println!("   Efficiency:    {:.2} pts/min", summary.average_efficiency);
    if let Some(trend) = summary.score_trend {
        let direction = if trend > 0.0 { "📈 up" } else { "📉 down" };
        println!("   Latest trend:  {} ({:+.1}%)", direction, trend);
    }

    println!("\n   {:>3} {:>6} {:>8} {:>9} {:>7}  outcome", "#", "score", "time(s)", "pts/min", "threat");
    for (i, m) in summary.sessions.iter().enumerate() {
        println!(
            "   {:>3} {:>6} {:>8.1} {:>9.2} {:>7.2}  {}",
            i + 1,
            m.score,
            m.duration_secs,
            m.efficiency,
            m.average_threat,
            m.outcome
        );
    }

    println!("\n   Items collected:");
    for (kind, count) in summary.items_collected.iter() {
        println!("   {:<20} {:>3}", kind.display_name(), count);
    }

    println!("\n   Outcomes:");
    for (outcome, count) in &summary.outcomes {
        let label = if outcome.is_empty() { "(unfinished)" } else { outcome.as_str() };
        println!(
            "   {:<20} {:>3} ({:>5.1}%)",
            label,
            count,
            summary.outcome_percentage(outcome)
        );
    }
    println!();
    if let Some([x, y]) = summary.avg_position {
        println!("   Avg position:  ({:.0}, {:.0})", x, y);
    }
    match summary.top_zone {
        Some(zone) => println!("   Top zone:      {}", zone),
        None => println!("   Top zone:      - (no positions recorded)"),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("session_tool CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
