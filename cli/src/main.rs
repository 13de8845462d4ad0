use std::fs::File;
use std::io::{self, BufReader, Read};

use clap::{Args, Parser, Subcommand};
use kinship::{Disconnected, FamilyTree, LayoutOptions, RootPolicy, TraversalKind};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read tree file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid tree JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Kinship(#[from] kinship::KinshipError),
}

#[derive(Parser, Debug)]
#[command(name = "kinship", about = "Query and lay out a family tree snapshot")]
struct Cli {
    #[arg(long, env = "KINSHIP_TREE", default_value = "-", help = "Tree JSON file path, or - for stdin")]
    tree: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Direct adjacency of one person.
    Person(PersonArgs),
    /// Ancestors, descendants, siblings or spouses of one person.
    Traverse(TraverseArgs),
    /// Positions and edges for the whole tree.
    Layout(LayoutArgs),
}

#[derive(Args, Debug)]
struct PersonArgs {
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct TraverseArgs {
    #[arg(long)]
    id: String,

    #[arg(long, value_parser = parse_kind)]
    kind: TraversalKind,

    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[arg(long, help = "Person at generation 0 (overrides --root-policy)")]
    root: Option<String>,

    #[arg(long, value_parser = parse_policy)]
    root_policy: Option<RootPolicy>,

    #[arg(long, default_value_t = false, help = "Lay out unreached families side by side")]
    side_by_side: bool,
}

fn parse_kind(raw: &str) -> Result<TraversalKind, String> {
    raw.parse().map_err(|e: kinship::KinshipError| e.to_string())
}

fn parse_policy(raw: &str) -> Result<RootPolicy, String> {
    raw.parse().map_err(|e: kinship::KinshipError| e.to_string())
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let tree = load_tree(&cli.tree)?;
    tracing::info!(persons = tree.persons.len(), relationships = tree.relationships.len(), "tree loaded");

    match cli.command {
        Command::Person(args) => run_person(&tree, &args),
        Command::Traverse(args) => run_traverse(&tree, &args),
        Command::Layout(args) => run_layout(&tree, args),
    }
}

fn load_tree(path: &str) -> Result<FamilyTree, CliError> {
    let mut raw = String::new();
    let read = if path == "-" {
        io::stdin().read_to_string(&mut raw)
    } else {
        File::open(path).and_then(|file| BufReader::new(file).read_to_string(&mut raw))
    };
    read.map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

fn run_person(tree: &FamilyTree, args: &PersonArgs) -> Result<(), CliError> {
    let graph = tree.graph()?;
    let spouses: Vec<Value> = graph
        .spouse_links(&args.id)
        .iter()
        .map(|link| {
            json!({
                "id": link.spouse_id,
                "marriageDate": link.marriage_date,
                "divorceDate": link.divorce_date,
            })
        })
        .collect();
    print_json(&json!({
        "id": args.id,
        "known": graph.contains_person(&args.id),
        "parents": graph.parents_of(&args.id),
        "children": graph.children_of(&args.id),
        "spouses": spouses,
        "declaredSiblings": graph.declared_siblings(&args.id),
    }))
}

fn run_traverse(tree: &FamilyTree, args: &TraverseArgs) -> Result<(), CliError> {
    let graph = tree.graph()?;
    let relatives: Vec<Value> = kinship::traverse_with_generation(&graph, &args.id, args.kind, args.max_depth)
        .into_iter()
        .map(|r| json!({ "id": r.person.id, "name": r.person.name, "generation": r.generation }))
        .collect();
    print_json(&json!({ "id": args.id, "kind": args.kind, "relatives": relatives }))
}

fn run_layout(tree: &FamilyTree, args: LayoutArgs) -> Result<(), CliError> {
    let graph = tree.graph()?;
    let mut options = LayoutOptions::from_env();
    if let Some(root) = args.root {
        options.root_id = Some(root);
    }
    if let Some(policy) = args.root_policy {
        options.root_policy = policy;
    }
    if args.side_by_side {
        options.disconnected = Disconnected::SideBySide;
    }

    let result = kinship::layout(&graph, &options)?;
    print_json(&serde_json::to_value(&result)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
