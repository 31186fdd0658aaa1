//! Contacts client commands - talk to a running phonebook server over HTTP
//!
//! ```bash
//! phonebook contacts add --name Bob --phone 555-1234
//! phonebook contacts list --json | jq '.[].name'
//! phonebook contacts delete 1
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use phonebook_core::{Contact, NewContact, PhonebookConfig};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Parser, Debug)]
pub struct ContactsArgs {
    /// Server endpoint (default: http://127.0.0.1:8000)
    #[arg(long, env = "PHONEBOOK_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: ContactsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ContactsCommands {
    /// List all contacts
    List(ListArgs),
    /// Create a contact
    Add(AddArgs),
    /// Delete a contact by id
    Delete(DeleteArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Contact name
    #[arg(long, short)]
    pub name: String,

    /// Phone number
    #[arg(long, short)]
    pub phone: String,

    /// Print the created contact as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Contact ID to delete
    pub id: i64,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    detail: String,
}

/// Thin HTTP client for the contacts API
struct ContactsClient {
    client: Client,
    endpoint: String,
}

impl ContactsClient {
    fn new(endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn list(&self) -> Result<Vec<Contact>> {
        let response = self
            .client
            .get(self.url("/api/contacts"))
            .send()
            .await
            .context("Failed to connect to phonebook server")?;
        handle_response(response).await
    }

    async fn create(&self, new: &NewContact) -> Result<Contact> {
        let response = self
            .client
            .post(self.url("/api/contacts"))
            .json(new)
            .send()
            .await
            .context("Failed to connect to phonebook server")?;
        handle_response(response).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/contacts/{id}")))
            .send()
            .await
            .context("Failed to connect to phonebook server")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error_from_body(status, &response.text().await.unwrap_or_default()))
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(error_from_body(status, &error_text))
    }
}

/// Prefer the server's `detail` reason over the raw body
fn error_from_body(status: StatusCode, body: &str) -> anyhow::Error {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => anyhow!("{}: {}", status, err.detail),
        Err(_) => anyhow!("{}: {}", status, body),
    }
}

fn resolve_endpoint(args: &ContactsArgs) -> Result<String> {
    // Priority: flag/env > config.toml > default
    if let Some(ref endpoint) = args.endpoint {
        return Ok(endpoint.clone());
    }
    let config = PhonebookConfig::load().context("Failed to load config")?;
    Ok(config.client.endpoint)
}

fn get_output_format(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}

fn format_contact_line(contact: &Contact) -> String {
    format!("{:>5}  {:<24}  {}", contact.id, contact.name, contact.phone)
}

pub async fn run_contacts(args: ContactsArgs) -> Result<()> {
    let endpoint = resolve_endpoint(&args)?;
    let client = ContactsClient::new(&endpoint)?;
    tracing::debug!(endpoint = %client.endpoint, "using phonebook server");

    match args.command {
        ContactsCommands::List(list_args) => run_list(&client, list_args).await,
        ContactsCommands::Add(add_args) => run_add(&client, add_args).await,
        ContactsCommands::Delete(delete_args) => run_delete(&client, delete_args).await,
    }
}

async fn run_list(client: &ContactsClient, args: ListArgs) -> Result<()> {
    let contacts = client.list().await?;

    match get_output_format(args.output, args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&contacts)?);
        }
        OutputFormat::Quiet => {
            for contact in &contacts {
                println!("{}", contact.id);
            }
        }
        OutputFormat::Human => {
            if contacts.is_empty() {
                println!("No contacts");
                return Ok(());
            }
            println!("{:>5}  {:<24}  {}", "ID", "NAME", "PHONE");
            for contact in &contacts {
                println!("{}", format_contact_line(contact));
            }
        }
    }
    Ok(())
}

async fn run_add(client: &ContactsClient, args: AddArgs) -> Result<()> {
    let contact = client
        .create(&NewContact::new(args.name, args.phone))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        println!("Created contact {}: {} ({})", contact.id, contact.name, contact.phone);
    }
    Ok(())
}

async fn run_delete(client: &ContactsClient, args: DeleteArgs) -> Result<()> {
    client.delete(args.id).await?;
    println!("Deleted contact {}", args.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = ContactsClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/contacts"), "http://localhost:8000/api/contacts");
    }

    #[test]
    fn json_flag_wins() {
        assert_eq!(get_output_format(OutputFormat::Human, true), OutputFormat::Json);
        assert_eq!(get_output_format(OutputFormat::Quiet, false), OutputFormat::Quiet);
    }

    #[test]
    fn detail_is_extracted_from_error_body() {
        let err = error_from_body(StatusCode::NOT_FOUND, r#"{"detail":"Contact not found"}"#);
        assert_eq!(err.to_string(), "404 Not Found: Contact not found");
    }

    #[test]
    fn raw_body_used_when_not_json() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "502 Bad Gateway: upstream down");
    }

    #[test]
    fn contact_line_is_aligned() {
        let line = format_contact_line(&Contact {
            id: 1,
            name: "Bob".into(),
            phone: "555-1234".into(),
        });
        assert!(line.starts_with("    1  Bob"));
        assert!(line.ends_with("555-1234"));
    }
}
