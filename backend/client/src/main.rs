use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use terms::{Entry, Preview, WorkingSet, preview, term_key};

mod api;

use api::Api;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the glossary server
    #[arg(long, env = "GLOSSARY_SERVER", default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every term
    List,

    /// Filter terms whose name contains the query
    Search { query: String },

    /// Print one term in full
    Show { name: String },

    /// Add a term, or replace the description of an existing one
    Add {
        name: String,

        description: String,

        #[arg(long, env = "GLOSSARY_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let api = Api::new(&args.server);

    match args.command {
        Command::List => {
            let working_set = api.fetch_all().await?;
            print_entries(&api, &working_set, "");
        }
        Command::Search { query } => {
            let working_set = api.fetch_all().await?;
            print_entries(&api, &working_set, &query);
        }
        Command::Show { name } => {
            let working_set = api.fetch_all().await?;
            let key = term_key(&name);

            match working_set.entries().iter().find(|entry| entry.key() == key) {
                Some(entry) => println!("{}\n\n{}", entry.name, entry.description),
                None => bail!("No term named {name:?}"),
            }
        }
        Command::Add {
            name,
            description,
            password,
        } => {
            let message = api.upsert(name.trim(), description.trim(), &password).await?;
            println!("{message}\n");

            let working_set = api.fetch_all().await?;
            print_entries(&api, &working_set, "");
        }
    }

    Ok(())
}

fn print_entries(api: &Api, working_set: &WorkingSet, query: &str) {
    let outcome = working_set.search(query);

    if let Some(message) = outcome.message() {
        println!("{message}");
    }

    if let Some(placeholder) = outcome.placeholder() {
        if outcome.message().as_deref() != Some(placeholder) {
            println!("{placeholder}");
        }
        return;
    }

    for entry in outcome.entries() {
        println!("{}", format_line(api, entry));
    }
}

fn format_line(api: &Api, entry: &Entry) -> String {
    match preview(entry) {
        Preview::Full(description) => format!("{}: {description}", entry.name),
        Preview::Truncated { text, href } => {
            format!("{}: {text} <{}>", entry.name, api.url(&href))
        }
    }
}
