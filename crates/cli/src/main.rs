//! Two-level TLB simulator CLI.

use clap::Parser;
use std::process;

use tlbsim::config::Config;
use tlbsim::sim::simulator::RunSummary;
use tlbsim::sim::trace;
use tlbsim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "tlbsim",
    author,
    version,
    about = "Two-level TLB simulator",
    long_about = None,
)]
struct Cli {
    /// Memory trace to replay (`R|W <addr>` or `I <vpn>` per line).
    #[arg(short = 't', long)]
    trace: String,

    /// JSON configuration; built-in defaults are used when omitted.
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Print the run summary as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load(&path).unwrap_or_else(|e| fail(&e.to_string())),
        None => Config::default(),
    };
    let ops = trace::load_trace(&cli.trace).unwrap_or_else(|e| fail(&e.to_string()));

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| fail(&e.to_string()));
    log::info!("replaying {} operations from {}", ops.len(), cli.trace);
    let summary = sim.run(&ops);

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(&e.to_string()),
        }
    } else {
        print_summary(&summary);
    }
}

fn print_summary(summary: &RunSummary) {
    println!("[*] Accesses:       {}", summary.accesses);
    println!("[*] Invalidations:  {}", summary.invalidations);
    println!("[*] Faults:         {}", summary.faults);
    println!("[*] Page walks:     {}", summary.page_walks);
    println!("[*] Write-backs:    {}", summary.writebacks);
    println!("[*] Elapsed:        {} ns", summary.elapsed_ns);
    summary.tlb.print();
}

fn fail(msg: &str) -> ! {
    eprintln!("\x1b[1;31merror:\x1b[0m {}", msg);
    process::exit(1);
}
