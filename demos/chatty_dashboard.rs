//! A terminal stand-in for the browser dashboard. Runs the default
//! Chatty I/O workload for 2000 ticks and prints the queue, the server
//! grid and the running statistics every few hundred ticks.
//!
//! The dashboard decides its own speed: each refresh advances the
//! session by `SPEED` ticks, exactly as a graphical front end would
//! batch several ticks per rendered frame. Set `RUST_LOG=chatty_io=debug`
//! to also see every arrival that hit a full buffer.

use chatty_io::{BufferLoad, Session, SimulationEngine, SimulationParams, StatsReport};

const SPEED: usize = 10;
const REFRESH_EVERY: u64 = 250;

fn render(session: &Session) {
    let engine = session.engine();
    let buffer = engine.buffer();

    let bar_width = 30;
    let filled = (buffer.fill_ratio() * bar_width as f64).round() as usize;
    let warning = match buffer.load() {
        BufferLoad::Critical => "  queue almost full!",
        BufferLoad::High => "  high load",
        BufferLoad::Normal => "",
    };
    println!(
        "queue [{}{}] {}/{}{}",
        "#".repeat(filled),
        ".".repeat(bar_width - filled),
        buffer.len(),
        buffer.capacity(),
        warning
    );

    let grid: Vec<String> = engine
        .servers()
        .iter()
        .map(|server| format!("{}: {}", server, if server.is_free() { "free" } else { "BUSY" }))
        .collect();
    println!("servers {}", grid.join(" | "));

    print_stats(&session.report());
}

fn print_stats(report: &StatsReport) {
    println!("time                {} / {}", report.elapsed, report.total_time);
    println!("primary requests    {}", report.total_primary_requests);
    println!("chatty requests     {}", report.chatty_requests);
    println!("sub-requests        {}", report.total_sub_requests);
    println!("processed           {}", report.processed_requests);
    println!("rejected            {}", report.rejected_sub_requests);
    println!("rejection prob.     {:.1}%", report.rejection_probability);
    println!("server utilization  {:.1}%", report.average_utilization);
    println!();
}

fn main() {
    chatty_io::logging::init_logging();

    let engine = SimulationEngine::new(SimulationParams::default()).expect("default params should be valid");
    let mut session = Session::new(engine);

    let mut last_render = 0;
    while session.advance(SPEED) {
        let now = session.engine().current_time();
        if now - last_render >= REFRESH_EVERY {
            render(&session);
            last_render = now;
        }
    }

    println!("Simulation finished.");
    render(&session);

    let peak = session.history().map(|sample| sample.queue_len).max().unwrap_or(0);
    println!(
        "peak queue length over the last {} ticks: {}",
        session.history().count(),
        peak
    );
}
