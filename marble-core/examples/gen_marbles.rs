//! Render every configured marble diagram into a directory.
//!
//! Usage: gen_marbles [config.yml] [out_dir]

use std::env;
use std::fs;
use std::path::Path;

use marble_core::{config, load_or_default, render};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("marbles/kafka-marbles.yml");
    let out_dir = Path::new(args.get(2).map(String::as_str).unwrap_or("dist/marbles"));

    let document = fs::read_to_string(config_path).ok();
    let specs = load_or_default(document.as_deref());

    fs::create_dir_all(out_dir).expect("Failed to create output directory");
    for spec in &specs {
        let file = out_dir.join(format!("{}.svg", spec.name));
        fs::write(&file, render(spec)).expect("Failed to write SVG");
        println!("{} -> {}", spec.name, file.display());
    }

    fs::write(out_dir.join("README.md"), config::catalog_markdown(&specs))
        .expect("Failed to write catalog");
}
