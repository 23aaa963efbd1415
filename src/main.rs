use std::{sync::Arc, time::Duration};

use clap::Parser;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use github_analytics::{
    CounterSettings, GITHUB_REST_ENDPOINT, RestFetcher, SearchSession, SequentialSearch, StdResult,
    TerminalRenderer,
};

/// Command line arguments for the GitHub analytics dashboard
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// GitHub usernames to search, read line by line from standard input when omitted
    usernames: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_BASE", default_value = GITHUB_REST_ENDPOINT)]
    api_base: String,

    /// Animate the profile counters
    #[arg(short, long)]
    animate_counters: bool,

    /// Duration of the counters animation, in milliseconds
    #[arg(long, default_value_t = 1000)]
    counter_duration_ms: u64,

    /// Number of frames drawn during the counters animation
    #[arg(long, default_value_t = 20)]
    counter_frames: u32,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    debug!("Arguments: {args:?}");

    let session = build_session(&args)?;
    if args.usernames.is_empty() {
        search_from_stdin(&session).await?;
    } else {
        search_all(&session, &args.usernames).await?;
    }

    Ok(())
}

fn build_session(args: &Args) -> StdResult<SearchSession> {
    let fetcher = Arc::new(RestFetcher::try_new(&args.api_base)?);
    let counters = args.animate_counters.then(|| CounterSettings {
        duration: Duration::from_millis(args.counter_duration_ms),
        frames: args.counter_frames,
    });
    let renderer = Arc::new(TerminalRenderer::new(std::io::stdout(), counters));

    Ok(SearchSession::new(
        Arc::new(SequentialSearch::new(fetcher)),
        renderer,
    ))
}

async fn search_all(session: &SearchSession, usernames: &[String]) -> StdResult<()> {
    for username in usernames {
        if let Some(handle) = session.submit(username).await? {
            let outcome = handle.wait().await?;
            debug!("Search for {username} ended: {outcome:?}");
        }
    }

    Ok(())
}

async fn search_from_stdin(session: &SearchSession) -> StdResult<()> {
    info!("Reading usernames from standard input");
    let mut lines = BufReader::new(stdin()).lines();
    let mut latest = None;
    while let Some(line) = lines.next_line().await? {
        if let Some(handle) = session.submit(&line).await? {
            latest = Some(handle);
        }
    }
    if let Some(handle) = latest {
        let outcome = handle.wait().await?;
        debug!("Last search ended: {outcome:?}");
    }

    Ok(())
}
