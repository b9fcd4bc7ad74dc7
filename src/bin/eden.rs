use anyhow::{bail, Context};
use eden::ga::{Eden, EdenConfig};
use eden::sink::CsvSink;
use getopts::{Matches, Options};
use std::env;
use std::str::FromStr;

fn usage(program: &str, opts: &Options) -> String {
    let brief = format!("Usage: {} [options] TARGET", program);
    opts.usage(&brief)
}

fn build_options() -> Options {
    let mut opts = Options::new();
    opts.optopt("c", "config", "read settings from a TOML file", "FILE");
    opts.optopt("p", "population", "population size (default 40)", "N");
    opts.optopt("i", "iterations", "maximum generations (default 1000000)", "N");
    opts.optopt("m", "mutation-rate", "per-character mutation rate (default 0.05)", "RATE");
    opts.optopt("f", "fitness", "fitness at which to stop (default 1.0)", "F");
    opts.optopt("o", "offspring", "offspring per generation (default 25)", "N");
    opts.optopt("s", "seed", "random seed", "SEED");
    opts.optopt("l", "log-dir", "directory for the fitness CSV (default ./log)", "DIR");
    opts.optflag("", "no-log", "do not write the fitness CSV");
    opts.optflag("h", "help", "print this help menu");
    opts
}

fn parse_opt<T>(matches: &Matches, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .opt_str(name)
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("invalid value for --{}: {:?}", name, v))
        })
        .transpose()
}

fn build_config(matches: &Matches) -> anyhow::Result<EdenConfig> {
    let mut config = match matches.opt_str("config") {
        Some(path) => EdenConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => EdenConfig::default(),
    };

    if let Some(target) = matches.free.first() {
        config.target = target.clone();
    }
    if let Some(n) = parse_opt(matches, "population")? {
        config = config.with_population_size(n);
    }
    if let Some(n) = parse_opt(matches, "iterations")? {
        config = config.with_max_iterations(n);
    }
    if let Some(rate) = parse_opt(matches, "mutation-rate")? {
        config = config.with_mutation_rate(rate);
    }
    if let Some(f) = parse_opt(matches, "fitness")? {
        config = config.with_fitness_target(f);
    }
    if let Some(n) = parse_opt(matches, "offspring")? {
        config = config.with_offspring_count(n);
    }
    if let Some(seed) = parse_opt(matches, "seed")? {
        config = config.with_seed(seed);
    }

    if config.target.is_empty() {
        bail!("no TARGET given on the command line or in the config file");
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "eden".to_string());
    let opts = build_options();
    let matches = opts
        .parse(args)
        .with_context(|| usage(&program, &opts))?;

    if matches.opt_present("h") {
        print!("{}", usage(&program, &opts));
        return Ok(());
    }
    if matches.free.len() > 1 {
        bail!("expected a single TARGET\n{}", usage(&program, &opts));
    }

    let config = build_config(&matches)?;
    let mut eden = Eden::new(config)?;

    let result = if matches.opt_present("no-log") {
        eden.evolve()?
    } else {
        let mut sink = match matches.opt_str("log-dir") {
            Some(dir) => CsvSink::new(dir),
            None => CsvSink::in_current_dir().context("cannot resolve current directory")?,
        };
        let result = eden.evolve_into(&mut sink)?;
        if let Some(path) = sink.last_path() {
            log::info!("fitness log written to {}", path.display());
        }
        result
    };

    println!("{}", result.best);
    Ok(())
}
