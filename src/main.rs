//! Native fireworks window. Takes an optional options TOML path.

use std::path::Path;

use fireworks::{options::Options, Viewer};

fn main() {
    env_logger::init();

    // Optional TOML options file as the only argument.
    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
