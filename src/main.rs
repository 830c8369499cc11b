use average::Estimate;
use log::info;
use mlq_model::{Job, MlqConfig, Sim, sim::Workload};
use rand::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let workload = match std::env::args().nth(1) {
        Some(path) => Workload::from_path(&path)?,
        None => Workload {
            config: MlqConfig::default(),
            jobs: bernoulli_jobs(40, 0.3, 0.3, 2, 6, 0),
        },
    };
    info!(
        "Simulating {} jobs with {:?}",
        workload.jobs.len(),
        workload.config
    );

    let mut sim = Sim::from_workload(workload);
    sim.run_with(|now, event| println!("t={} {:?}", now, event))?;

    let report = sim.report();
    for stats in &report.processes {
        println!(
            "pid={} arrival={} burst={} start={:?} finish={:?} waiting={:?} runs={}",
            stats.pid,
            stats.arrival_time,
            stats.burst_time,
            stats.start_time,
            stats.finish_time,
            stats.waiting_time,
            stats.runs
        );
    }

    println!("Average response time: {:.2} ticks", report.avg_response);
    println!("Average waiting time: {:.2} ticks", report.avg_waiting);
    println!("Average turnaround time: {:.2} ticks", report.avg_turnaround);
    println!("CPU utilization: {:.1}%", report.utilization * 100.0);
    println!("Longest idle period: {} ticks", report.longest_idle);

    // Turnaround relative to burst; 1.0 means never delayed
    let slowdowns = sim.jobs_map(|p| {
        p.turnaround_time().unwrap_or(0) as f64 / p.burst_time as f64
    });
    println!("Average slowdown: {:.2}x", avg(slowdowns));

    if std::env::var_os("MLQ_JSON").is_some() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

// Priorities are drawn slightly past the top level to exercise clamping
fn bernoulli_jobs(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(Job {
                pid: jobs.len() as u64,
                arrival_time: t,
                burst_time,
                priority: rng.random_range(0..=12),
            });
        }
    }

    jobs
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
