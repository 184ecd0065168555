use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use routing_tables::{
    types::{NodeId, Weight, NO_NEXT_HOP},
    utils::{data_structures::Matrix, graph_generator::random_connected_graph, measure_time},
    RoutingConfig, RoutingGraph, RoutingTable, RoutingTableBuilder, WeightedGraph,
};

#[derive(Parser)]
#[clap(name = "routing_tables", version, about = "computes all pairs next hop and distance tables")]
struct Opts {

    #[clap(subcommand)]
    subcmd: SubCommand
}

#[derive(Parser)]
enum SubCommand {
    /// compute the routing table of a random connected graph
    Random(RandomCommand),
    /// compute and print the routes of a small fixed road network
    Example
}

#[derive(Parser)]
struct RandomCommand {

    /// number of vertices of the generated graph
    #[clap(short, long)]
    num_vertices: usize,

    /// number of random edges added on top of the spanning tree / cycle
    #[clap(short, long, default_value="0")]
    extra_edges: usize,

    /// generate a directed graph
    #[clap(short, long)]
    directed: bool,

    /// smallest edge length, 0 allows zero length edges
    #[clap(long, default_value="1")]
    min_weight: u32,

    /// edge lengths are drawn from min_weight..=max_weight
    #[clap(short, long, default_value="10")]
    max_weight: u32,

    /// seed for the random number generator, random if not set
    #[clap(short, long)]
    seed: Option<u64>,

    /// keep unreachable pairs as sentinels instead of failing
    #[clap(short, long)]
    allow_unreachable: bool,

    /// print the next hop and distance matrix
    #[clap(short, long)]
    print: bool
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts: Opts = Opts::parse();

    match opts.subcmd {
        SubCommand::Random(command) => random_graph_routing(&command),
        SubCommand::Example => road_network_example(),
    }
}

fn random_graph_routing(command: &RandomCommand) -> anyhow::Result<()> {
    let mut rng = match command.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let graph = random_connected_graph(&mut rng, command.num_vertices, command.extra_edges, command.directed, command.min_weight, command.max_weight)?;
    info!(num_vertices = graph.num_vertices(), num_edges = graph.num_edges(), directed = command.directed, "graph generated");

    let config = if command.allow_unreachable {
        RoutingConfig::allow_unreachable()
    }
    else {
        RoutingConfig::default()
    };

    let (elapsed, routing_table) = measure_time(|| RoutingTableBuilder::new(config).compute(&graph));
    let routing_table = routing_table?;

    info!(searches = routing_table.searches(), elapsed_ms = elapsed.as_millis() as u64, "routing table done");

    if command.print {
        print_tables(&routing_table);
    }

    Ok(())
}

//  hamburg ---3--- berlin
//     |              |
//     6              2
//     |              |
//  cologne --4-- leipzig ---5--- munich
//     |                            |
//     +-------------9--------------+
fn road_network_example() -> anyhow::Result<()> {
    let city_names = ["hamburg", "berlin", "cologne", "leipzig", "munich"];
    let edges = [(0, 1, 3.0), (0, 2, 6.0), (1, 3, 2.0), (2, 3, 4.0), (3, 4, 5.0), (2, 4, 9.0)];

    let graph = WeightedGraph::new(city_names.len(), false, &edges)?;
    let routing_table = RoutingTableBuilder::default().compute(&graph)?;

    for source in graph.node_ids() {
        for target in graph.node_ids() {
            if source == target {
                continue;
            }

            let route: Vec<&str> = routing_table.path(source, target)
                .unwrap_or_default()
                .iter()
                .map(|node| city_names[*node as usize])
                .collect();

            println!("{} -> {}: {} via {}",
                city_names[source as usize],
                city_names[target as usize],
                format_distance(routing_table.distance_matrix().get(source as usize, target as usize)),
                route.join(" -> ")
            );
        }
    }

    Ok(())
}

fn print_tables(routing_table: &RoutingTable) {
    println!("next hop:");
    print_matrix(routing_table.next_hop_matrix(), |next_hop: NodeId| {
        if next_hop == NO_NEXT_HOP { String::from("-") } else { next_hop.to_string() }
    });

    println!("distance:");
    print_matrix(routing_table.distance_matrix(), format_distance);
}

fn print_matrix<T: Copy>(matrix: &Matrix<T>, format: impl Fn(T) -> String) {
    for row in 0..matrix.rows() {
        let entries: Vec<String> = matrix.row(row).iter().map(|entry| format!("{:>6}", format(*entry))).collect();
        println!("{}", entries.join(" "));
    }
}

fn format_distance(distance: Weight) -> String {
    if distance.is_finite() {
        format!("{}", distance)
    }
    else {
        String::from("inf")
    }
}
