use anyhow::Result;
use apigw_tfgen::ir::EndpointRow;
use apigw_tfgen::{
    apply_api_key_override, example_endpoints_toml, generate_terraform, lint_endpoints,
    load_endpoints, validate_rows, HttpMethod, ResourceTree,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINTS_FILE: &str = "endpoints.toml";

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Terraform for every endpoint in the endpoints file
    Generate {
        /// Endpoints file; defaults to APIGW_ENDPOINTS_FILE, then endpoints.toml
        #[arg(long)]
        file: Option<String>,
        /// Path to write the generated Terraform. Prints to stdout if not set.
        #[arg(long)]
        out: Option<String>,
        /// Require an API key on every method regardless of the file
        #[arg(long)]
        require_api_key: bool,
        /// Fail if the lint finds resource name collisions or duplicate methods
        #[arg(long)]
        strict: bool,
    },
    /// Generate Terraform for one endpoint given on the command line
    Single {
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "GET")]
        method: HttpMethod,
        #[arg(long)]
        backend_uri: String,
        #[arg(long)]
        api_key_required: bool,
        /// Path to write the generated Terraform. Prints to stdout if not set.
        #[arg(long)]
        out: Option<String>,
    },
    /// Check the endpoints for resource name collisions and duplicate methods
    Lint {
        #[arg(long)]
        file: Option<String>,
    },
    /// Print the resource tree built from the endpoints
    Tree {
        #[arg(long)]
        file: Option<String>,
        #[arg(long, value_enum, default_value_t = TreeFormat::Text)]
        format: TreeFormat,
    },
    /// Print a sample endpoints file
    Example {
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TreeFormat {
    Text,
    Json,
}

fn endpoints_file(file: Option<String>) -> String {
    file.or_else(|| std::env::var("APIGW_ENDPOINTS_FILE").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINTS_FILE.to_string())
}

fn write_output(out: Option<String>, text: &str) -> Result<()> {
    if let Some(path) = out {
        fs::write(&path, text)?;
        tracing::info!(path = %path, "wrote output");
    } else {
        print!("{}", text);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apigw_tfgen=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            out,
            require_api_key,
            strict,
        } => {
            let mut endpoints = load_endpoints(&endpoints_file(file))?;
            if require_api_key {
                apply_api_key_override(&mut endpoints, true);
            }
            if strict {
                let errors = lint_endpoints(&endpoints);
                if !errors.is_empty() {
                    for e in &errors {
                        eprintln!("{}", e);
                    }
                    anyhow::bail!("Endpoint lint failed");
                }
            }
            let terraform = generate_terraform(&endpoints)?;
            write_output(out, &terraform)?;
        }
        Commands::Single {
            path,
            method,
            backend_uri,
            api_key_required,
            out,
        } => {
            if path.trim().is_empty() {
                anyhow::bail!("Please enter an endpoint path");
            }
            if backend_uri.trim().is_empty() {
                anyhow::bail!("Please enter a backend URI");
            }
            let endpoints = validate_rows(vec![EndpointRow {
                path,
                method,
                backend_uri,
                api_key_required,
            }])?;
            let terraform = generate_terraform(&endpoints)?;
            write_output(out, &terraform)?;
        }
        Commands::Lint { file } => {
            let endpoints = load_endpoints(&endpoints_file(file))?;
            let errors = lint_endpoints(&endpoints);
            if errors.is_empty() {
                println!("Endpoint lint passed");
            } else {
                for e in &errors {
                    eprintln!("{}", e);
                }
                anyhow::bail!("Endpoint lint failed");
            }
        }
        Commands::Tree { file, format } => {
            let endpoints = load_endpoints(&endpoints_file(file))?;
            let tree = ResourceTree::build(&endpoints)?;
            match format {
                TreeFormat::Text => print!("{}", tree.render_text()),
                TreeFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
            }
        }
        Commands::Example { out } => {
            write_output(out, &example_endpoints_toml()?)?;
        }
    }

    Ok(())
}
