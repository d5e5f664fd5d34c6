extern crate splay_set;

use simplelog::SimpleLogger;
use splay_set::harness::{self, Config};
use std::env;
use std::process;

fn main() {
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(error) => {
            println!("Illegal arguments given to program: {}", error);
            return;
        },
    };

    let log_level = env::var(harness::LOG_LEVEL_VAR).ok();
    let log_level = match harness::parse_log_level(log_level.as_ref().map(String::as_str)) {
        Ok(log_level) => log_level,
        Err(error) => {
            println!("{}", error);
            return;
        },
    };
    if SimpleLogger::init(log_level, simplelog::Config::default()).is_err() {
        println!("Logger was already initialized");
    }

    let mut rng = rand::thread_rng();
    match harness::run(&config, &mut rng) {
        Ok(_) => println!("All tests passed!"),
        Err(divergence) => {
            println!("Error! {}", divergence);
            process::exit(1);
        },
    }
}
