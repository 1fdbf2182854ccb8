use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use mc_slp::SlpConnTcp;

/// Print the status JSON of a minecraft server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Server host name or IP address
    address: String,

    /// Server port
    #[arg(default_value_t = 25565)]
    port: u16,

    /// Connect, read and write timeout in seconds, 0 waits forever
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Measure round-trip latency with a ping after the status response
    #[arg(long)]
    ping: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));

    let mut conn = SlpConnTcp::connect((args.address.as_str(), args.port), timeout)
        .with_context(|| format!("failed to connect to {}:{}", args.address, args.port))?;

    let status = conn
        .query_status(&args.address, args.port)
        .context("status query failed")?;
    println!("{status}");

    if args.ping {
        let payload = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| i64::try_from(elapsed.as_millis()).ok())
            .unwrap_or_default();

        let started = Instant::now();
        conn.ping(payload).context("ping failed")?;
        println!("ping: {}ms", started.elapsed().as_millis());
    }

    Ok(())
}
