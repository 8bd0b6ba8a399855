use clap::Parser;
use log::LevelFilter;

mod args;
mod story;

fn main() {
    let args = args::Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let res = story::run_story(
        &args.config,
        args.out.clone(),
        args.reference.clone(),
        args.seed,
    );

    if let Err(e) = res {
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
