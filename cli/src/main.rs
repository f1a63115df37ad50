use clap::Parser;
use log::info;
use taskscan_core::{scan_tasks, TasksOptions};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML scan config
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Root of a mounted target filesystem to scan directly
    #[clap(short, long, value_parser)]
    root: Option<String>,

    /// Scan a single task file instead of the standard locations
    #[clap(short, long, value_parser)]
    alt_file: Option<String>,

    /// Emit flat per-row records instead of one group per file
    #[clap(long)]
    flat: bool,

    /// Offset of the target system local zone, in seconds east of UTC
    #[clap(long, default_value_t = 0)]
    tz_offset: i32,
}

fn main() {
    let args = Args::parse();
    println!("[taskscan] Starting scheduled task scan!");

    if let Some(toml) = args.toml {
        if !toml.is_empty() {
            let scan_results = taskscan_core::core::parse_config_file(&toml);
            match scan_results {
                Ok(()) => info!("[taskscan] Scan success"),
                Err(err) => {
                    println!("[taskscan] Failed to scan tasks: {err:?}");
                    return;
                }
            }
        }
    } else if args.root.is_some() || args.alt_file.is_some() {
        let options = TasksOptions {
            target_root: args.root,
            alt_file: args.alt_file,
            group: !args.flat,
            tz_offset_seconds: args.tz_offset,
        };

        let scan = match scan_tasks(&options) {
            Ok(results) => results,
            Err(err) => {
                println!("[taskscan] Failed to scan tasks: {err:?}");
                return;
            }
        };
        for record in scan {
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(err) => println!("[taskscan] Could not serialize record: {err:?}"),
            }
        }
    } else {
        println!("[taskscan] No TOML config or scan target provided!");
        return;
    }
    println!("[taskscan] Finished scheduled task scan!");
}
