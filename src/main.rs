use pointburst::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = Simulation::new().with_title("pointburst - hold left mouse").run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
