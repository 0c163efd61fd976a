use anyhow::Result;
use clap::{Parser, Subcommand};
use estate_cli::EstateLayout;
use estate_core::{CreateTreeRequest, EstateRules};
use estate_sdk::EstateClient;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Estate drone planner CLI", long_about = None)]
struct Args {
    /// Estate server URL
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new estate
    CreateEstate {
        #[arg(long)]
        length: i64,
        #[arg(long)]
        width: i64,
    },
    /// Plant a tree in an estate
    AddTree {
        estate_id: String,
        #[arg(long)]
        x: i64,
        #[arg(long)]
        y: i64,
        #[arg(long)]
        height: i64,
    },
    /// Show an estate and its trees
    Show { estate_id: String },
    /// Tree height statistics of an estate
    Stats { estate_id: String },
    /// Drone survey distance of an estate
    DronePlan { estate_id: String },
    /// Plan a survey offline from a JSON layout file
    PlanFile {
        path: PathBuf,
        /// Tallest allowed tree
        #[arg(long, default_value_t = 30)]
        max_height: i64,
        /// Skip the tree height ceiling
        #[arg(long)]
        no_height_limit: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = EstateClient::new(args.url);

    match args.command {
        Command::CreateEstate { length, width } => {
            let id = client.create_estate(length, width).await?;
            println!("{}", id);
        }
        Command::AddTree {
            estate_id,
            x,
            y,
            height,
        } => {
            let id = client
                .add_tree(&estate_id, CreateTreeRequest { x, y, height })
                .await?;
            println!("{}", id);
        }
        Command::Show { estate_id } => {
            let estate = client.get_estate(&estate_id).await?;
            let trees = client.list_trees(&estate_id).await?;
            println!("Estate {} ({}x{})", estate.id, estate.length, estate.width);
            println!("Created: {}", estate.created_at.to_rfc3339());
            println!("Trees: {}", trees.len());
            for tree in trees {
                println!("  ({}, {}) height {}", tree.x, tree.y, tree.height);
            }
        }
        Command::Stats { estate_id } => {
            let stats = client.get_stats(&estate_id).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::DronePlan { estate_id } => {
            let distance = client.get_drone_distance(&estate_id).await?;
            println!("{}", serde_json::json!({ "distance": distance }));
        }
        Command::PlanFile {
            path,
            max_height,
            no_height_limit,
        } => {
            let rules = EstateRules {
                max_tree_height: max_height,
                enforce_tree_height: !no_height_limit,
                ..EstateRules::default()
            };
            let report = EstateLayout::from_path(&path)?.plan(&rules)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
