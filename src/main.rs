use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use tweetnet::config::Config;
use tweetnet::graph::features::SentimentChannels;
use tweetnet::graph::network::TweetNetwork;
use tweetnet::information;
use tweetnet::output::{matrix, terminal};
use tweetnet::sentiment::lexicon::LexiconScorer;
use tweetnet::sentiment::traits::SentimentScorer;
use tweetnet::tweets::record::load_tweets;

/// tweetnet: tweet similarity graphs and information-theory metrics.
///
/// Builds a weighted graph between tweets on a topic from their sentiment and
/// shared hashtags, and computes entropy, KL divergence and mutual
/// information over discrete distributions.
#[derive(Parser)]
#[command(name = "tweetnet", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the similarity network for a topic from {topic}_tweets.csv
    Build {
        /// Topic name, used as the prefix of the input and output files
        topic: String,

        /// Directory holding the tweet table (default: TWEETNET_DATA_DIR or .)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Worker threads for pairwise similarity (default: TWEETNET_WORKERS or 1)
        #[arg(long)]
        workers: Option<usize>,

        /// JSON lexicon merged over the built-in sentiment lexicon
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Number of strongest edges to show
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Entropy of a distribution, e.g. `entropy 0.5,0.25,0.125,0.125`
    Entropy {
        /// Comma-separated probabilities
        #[arg(allow_hyphen_values = true)]
        distribution: String,
    },

    /// KL divergence between two distributions, in both directions
    Kl {
        /// Comma-separated probabilities of p
        #[arg(long, allow_hyphen_values = true)]
        p: String,

        /// Comma-separated probabilities of the reference distribution q
        #[arg(long, allow_hyphen_values = true)]
        q: String,
    },

    /// Mutual information of a joint distribution
    MutualInfo {
        /// Rows separated by ';', columns by ',' (e.g. "0.25,0.25;0.25,0.25")
        #[arg(long)]
        joint: String,
    },

    /// Score the sentiment of a piece of text
    Sentiment {
        /// Text to score
        text: String,

        /// JSON lexicon merged over the built-in sentiment lexicon
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tweetnet=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            topic,
            data_dir,
            workers,
            lexicon,
            top,
        } => {
            Config::validate_topic(&topic)?;

            let mut config = Config::load()?;
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if lexicon.is_some() {
                config.lexicon_path = lexicon;
            }
            config.validate()?;

            let tweets = load_tweets(&config.tweets_path(&topic))?;
            if tweets.is_empty() {
                warn!(topic = %topic, "No tweets to connect, writing an empty network");
            }

            let scorer = load_scorer(config.lexicon_path.as_deref())?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg} ({elapsed})")
                    .unwrap(),
            );
            spinner.set_message(format!(
                "Building network over {} tweets ({} workers)",
                tweets.len(),
                config.workers
            ));
            spinner.enable_steady_tick(Duration::from_millis(120));

            let network = if config.workers > 1 {
                TweetNetwork::build_parallel(&tweets, &scorer, config.workers).await
            } else {
                TweetNetwork::build(&tweets, &scorer)
            };
            spinner.finish_and_clear();
            let network = network.with_context(|| format!("Failed to build network for {topic}"))?;

            let network_path = config.network_path(&topic);
            let nodes_path = config.nodes_path(&topic);
            matrix::write_adjacency_csv(&network, &network_path)?;
            matrix::write_node_map_csv(&network, &nodes_path)?;

            info!(topic = %topic, nodes = network.node_ids().len(), "Network build complete");

            terminal::display_network_summary(&topic, &network.summary(top), &tweets);
            terminal::display_written(&network_path, &nodes_path);
        }

        Commands::Entropy { distribution } => {
            let p = parse_distribution(&distribution)?;
            let h = information::entropy(&p)?;
            terminal::display_bits("H(p)", h);
        }

        Commands::Kl { p, q } => {
            let p = parse_distribution(&p)?;
            let q = parse_distribution(&q)?;

            terminal::display_bits("D(p || q)", information::kl_divergence(&p, &q)?);
            match information::kl_divergence(&q, &p) {
                Ok(reverse) => terminal::display_bits("D(q || p)", reverse),
                Err(e) => println!("{}: {}", "D(q || p)".bold(), format!("undefined ({e})").dimmed()),
            }
        }

        Commands::MutualInfo { joint } => {
            let joint = parse_joint(&joint)?;
            let (rows, cols) = information::marginals(&joint)?;

            terminal::display_bits("H(X)", information::entropy(&rows)?);
            terminal::display_bits("H(Y)", information::entropy(&cols)?);
            terminal::display_bits("H(X,Y)", information::joint_entropy(&joint)?);
            terminal::display_bits("I(X;Y)", information::mutual_information(&joint)?);
        }

        Commands::Sentiment { text, lexicon } => {
            let lexicon = lexicon.or_else(Config::lexicon_from_env);
            let scorer = load_scorer(lexicon.as_deref())?;
            let polarity = scorer.polarity(&text)?;
            let channels = SentimentChannels::from_polarity(polarity)?;
            terminal::display_polarity(&text, polarity, channels.negative, channels.positive);
        }
    }

    Ok(())
}

/// Build the lexicon scorer, with overrides when a lexicon file is configured.
fn load_scorer(lexicon: Option<&Path>) -> Result<LexiconScorer> {
    match lexicon {
        Some(path) => LexiconScorer::with_overrides(path),
        None => Ok(LexiconScorer::new()),
    }
}

/// Parse "0.5,0.25,0.25" into probabilities.
fn parse_distribution(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("Invalid probability {s:?}"))
        })
        .collect()
}

/// Parse "a,b;c,d" into a joint table, one row per ';'-separated group.
fn parse_joint(raw: &str) -> Result<Vec<Vec<f64>>> {
    raw.split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(parse_distribution)
        .collect()
}
