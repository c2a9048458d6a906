use std::{env, process};

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use osrs_stats_rust as osrs;

use osrs::hiscores::skill::Skill;
use osrs::pipeline;
use osrs::settings::Settings;

fn main() {
    dotenv::dotenv().ok();

    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to start the logger");

    let args: Vec<String> = env::args().collect();
    let (command, player) = match (args.get(1), args.get(2)) {
        (Some(command), Some(player)) => (command.as_str(), player.as_str()),
        _ => usage(&args),
    };

    match command {
        "get_skills" => {
            let settings = Settings::from_env();
            match pipeline::run(&settings, player) {
                Ok(stats) => {
                    let overall = stats.skills.get(Skill::Overall);
                    tracing::info!(
                        "Fetched stats for {}: overall level {}, rank {}",
                        player,
                        overall.level,
                        overall.rank
                    );
                }
                Err(why) => {
                    tracing::error!("{}", why);
                    process::exit(1);
                }
            }
        }
        _ => usage(&args),
    }
}

fn usage(args: &[String]) -> ! {
    let binary = args.first().map(String::as_str).unwrap_or("osrs_stats_rust");
    eprintln!("Usage: {} get_skills <player>", binary);
    process::exit(2);
}
