use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tracing::info;
use vref_codec::{Cursor, ProtocolHashEncoder, ProtocolHashParser, DELIMITER};
use vref_store::{HashStoreConfig, HashStores};
use vref_types::{NodeRef, Parameter, Reference, RepositoryLocation, Resource};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let stores = load_stores(cli.config.as_deref())?;
    match cli.command {
        Command::Decode(args) => cmd_decode(&stores, &args.encoded, &cli.format),
        Command::DecodeResource(args) => cmd_decode_resource(&stores, &args.encoded, &cli.format),
        Command::EncodeNode(args) => {
            let node: NodeRef = args.node.parse()?;
            cmd_encode_resource(&stores, Resource::node(node), &cli.format)
        }
        Command::EncodePath(args) => {
            let resource = match (args.classpath, args.repository) {
                (Some(path), _) => Resource::classpath(path),
                (None, Some(path)) => Resource::repository_path(path),
                (None, None) => anyhow::bail!("one of --classpath or --repository is required"),
            };
            cmd_encode_resource(&stores, resource, &cli.format)
        }
        Command::EncodeVirtual(args) => cmd_encode_virtual(&stores, args, &cli.format),
        Command::Stores => cmd_stores(&stores, &cli.format),
    }
}

fn load_stores(config: Option<&Path>) -> anyhow::Result<HashStores> {
    let config = match config {
        Some(path) => HashStoreConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?
            .merged_with_defaults(),
        None => HashStoreConfig::default(),
    };
    let stores = HashStores::from_config(&config)?;
    info!(?stores, "hash stores ready");
    Ok(stores)
}

fn cmd_decode(stores: &HashStores, encoded: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let parser = ProtocolHashParser::from_stores(stores);
    let reference = parser
        .parse(encoded)
        .with_context(|| format!("decoding {encoded:?}"))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reference)?),
        OutputFormat::Text => print_reference(&reference, 0),
    }
    Ok(())
}

fn cmd_decode_resource(stores: &HashStores, encoded: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let parser = ProtocolHashParser::from_stores(stores);
    let mut cursor = Cursor::tokenize(encoded);
    let resource = parser
        .parse_resource(&mut cursor)
        .with_context(|| format!("decoding {encoded:?}"))?;
    cursor.expect_end()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resource)?),
        OutputFormat::Text => println!("{}", render_resource(&resource)),
    }
    Ok(())
}

fn cmd_encode_resource(stores: &HashStores, resource: Resource, format: &OutputFormat) -> anyhow::Result<()> {
    let encoder = ProtocolHashEncoder::from_stores(stores);
    let tokens = encoder.encode_resource(&resource)?;
    let encoded = tokens.join(DELIMITER.to_string().as_str());
    print_encoded(&encoded, format)
}

fn cmd_encode_virtual(stores: &HashStores, args: EncodeVirtualArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let node: NodeRef = args.node.parse()?;
    let reference = Reference::virtual_ref(
        Resource::classpath(args.template),
        args.template_path,
        Resource::node(node),
    );
    let encoded = ProtocolHashEncoder::from_stores(stores).encode(&reference)?;
    print_encoded(&encoded, format)
}

fn cmd_stores(stores: &HashStores, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut all = serde_json::Map::new();
            for store in stores.all() {
                let entries: serde_json::Map<_, _> = store
                    .entries()?
                    .into_iter()
                    .map(|(value, hash)| (value, json!(hash)))
                    .collect();
                all.insert(store.name().to_string(), entries.into());
            }
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        OutputFormat::Text => {
            for store in stores.all() {
                println!("{}", store.name().bold());
                for (value, hash) in store.entries()? {
                    println!("  {} {}", hash.yellow(), value);
                }
            }
        }
    }
    Ok(())
}

fn print_encoded(encoded: &str, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "encoded": encoded }))?),
        OutputFormat::Text => println!("{}", encoded.green()),
    }
    Ok(())
}

fn render_resource(resource: &Resource) -> String {
    match resource {
        Resource::Classpath(path) => format!("{} {}", "classpath".cyan(), path),
        Resource::Repository(RepositoryLocation::Path(path)) => {
            format!("{} {}", "path".cyan(), path)
        }
        Resource::Repository(RepositoryLocation::Node(node)) => {
            format!("{} {}", "node".cyan(), node)
        }
    }
}

fn print_reference(reference: &Reference, indent: usize) {
    let pad = "  ".repeat(indent);
    println!("{pad}{:?} {}", reference.protocol, render_resource(&reference.resource));
    for parameter in &reference.parameters {
        match parameter {
            Parameter::String(s) => println!("{pad}  {} {}", "string".dimmed(), s),
            Parameter::Resource(r) => println!("{pad}  {}", render_resource(r)),
            Parameter::Reference(r) => print_reference(r, indent + 1),
        }
    }
}
