use clap::Parser;

use grid_traffic_sim::simulation::{
    self, SignalPlan, SimConfig, SimulationReport, TurnProbabilities,
};

#[derive(Parser)]
#[command(name = "grid_traffic_sim")]
#[command(about = "Fixed-cycle signal traffic simulation on an NxN grid")]
struct Cli {
    /// Number of intersections along each side of the grid
    #[arg(long, default_value_t = simulation::DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = simulation::DEFAULT_TOTAL_TICKS)]
    ticks: u64,

    /// Ticks the north-south phase stays green
    #[arg(long, default_value_t = simulation::DEFAULT_NS_GREEN)]
    ns_green: u64,

    /// Ticks the east-west phase stays green
    #[arg(long, default_value_t = simulation::DEFAULT_EW_GREEN)]
    ew_green: u64,

    /// Cars released per green approach per tick
    #[arg(long, default_value_t = simulation::DEFAULT_FLOW_PER_TICK)]
    flow_per_tick: usize,

    /// Maximum cars travelling on one link
    #[arg(long, default_value_t = simulation::DEFAULT_LINK_CAPACITY)]
    link_capacity: usize,

    /// Maximum cars waiting at one stop-line
    #[arg(long, default_value_t = simulation::DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Ticks needed to traverse a link
    #[arg(long, default_value_t = simulation::DEFAULT_BASE_TRAVEL_TIME)]
    travel_time: u32,

    /// Probability of a new car per entry link per tick
    #[arg(long, default_value_t = simulation::DEFAULT_ARRIVAL_RATE)]
    arrival_rate: f64,

    /// Probability of turning left at an intersection
    #[arg(long, default_value_t = 0.25)]
    left: f64,

    /// Probability of going straight at an intersection
    #[arg(long, default_value_t = 0.50)]
    straight: f64,

    /// Probability of turning right at an intersection
    #[arg(long, default_value_t = 0.25)]
    right: f64,

    /// Seed for the random source
    #[arg(long, default_value_t = simulation::DEFAULT_SEED)]
    seed: u32,
}

impl Cli {
    fn into_config(self) -> SimConfig {
        SimConfig {
            grid_size: self.grid_size,
            total_ticks: self.ticks,
            signal: SignalPlan::new(self.ns_green, self.ew_green),
            flow_per_tick: self.flow_per_tick,
            link_capacity: self.link_capacity,
            queue_capacity: self.queue_capacity,
            base_travel_time: self.travel_time,
            arrival_rate: self.arrival_rate,
            turn_probabilities: TurnProbabilities {
                left: self.left,
                straight: self.straight,
                right: self.right,
            },
            seed: self.seed,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    match simulation::run_simulation(config) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn print_report(report: &SimulationReport) {
    let config = &report.config;
    println!("Simulation Report (Single Run)");
    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    println!("Duration ticks: {}", report.ticks);
    println!(
        "NS green: {}, EW green: {}",
        config.signal.ns_green, config.signal.ew_green
    );
    println!("Arrival rate per boundary link: {}", config.arrival_rate);
    println!("Completed trips: {}", report.completed());
    println!("Throughput per tick: {}", report.throughput);
    println!("Mean travel time (ticks): {}", report.mean_travel_time);
    println!(
        "Mean vehicles in system (sampled): {}",
        report.mean_vehicles_in_system
    );
}
