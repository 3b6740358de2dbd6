//! Demo that analyzes argv text (or stdin when no args are given) and prints
//! the result JSON.

use std::io::Read;

use news_risk_analyzer::{analyze, EngineConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = EngineConfig::load()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };

    match analyze(&cfg, &text) {
        Ok(analysis) => println!("{}", serde_json::to_string_pretty(&analysis)?),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }

    Ok(())
}
