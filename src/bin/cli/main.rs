use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use remote_store::{
    app::{CredentialSource, StorageBackend, StoreBuilder, StoreConfig},
    assume_role, ObjectKey, RemoteStore, RoleArn,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "remote-store")]
#[command(about = "Proxy for files stored in a remote bucket", long_about = None)]
struct Cli {
    /// Bucket to operate on
    #[arg(short, long, env = "REMOTE_STORE_BUCKET")]
    bucket: Option<String>,

    /// Storage backend type
    #[arg(long, env = "REMOTE_STORE_BACKEND", default_value = "s3")]
    backend: String,

    /// Bucket region
    #[arg(long, env = "REMOTE_STORE_REGION", default_value = "us-east-1")]
    region: String,

    /// Custom endpoint URL (for S3-compatible deployments)
    #[arg(long, env = "REMOTE_STORE_ENDPOINT")]
    endpoint: Option<String>,

    /// Allow plain-HTTP endpoints
    #[arg(long, env = "REMOTE_STORE_ALLOW_HTTP", default_value = "false")]
    allow_http: bool,

    /// Access key for static credentials
    #[arg(long, env = "REMOTE_STORE_ACCESS_KEY")]
    access_key: Option<String>,

    /// Secret key for static credentials
    #[arg(long, env = "REMOTE_STORE_SECRET_KEY")]
    secret_key: Option<String>,

    /// Role to assume for storage access
    #[arg(long, env = "REMOTE_STORE_ROLE_ARN")]
    role_arn: Option<String>,

    /// Session name used when assuming a role
    #[arg(long, env = "REMOTE_STORE_SESSION_NAME")]
    session_name: Option<String>,

    /// Local cache directory
    #[arg(long, env = "REMOTE_STORE_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List objects matching one or more prefixes
    Ls {
        /// Prefixes to list; output order corresponds to prefix order
        prefixes: Vec<String>,

        /// Print listings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an object to stdout, decoding the gzip payload
    Cat {
        /// Object key
        key: String,

        /// Skip gzip decoding
        #[arg(long)]
        raw: bool,
    },

    /// Download objects into the local cache
    Fetch {
        /// Object keys
        keys: Vec<String>,
    },

    /// Inspect and invalidate the local cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Assume a storage role and print its temporary credentials
    AssumeRole {
        /// ARN of the role to assume
        role: String,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Print the local cache path of an object
    Path {
        /// Object key
        key: String,
    },

    /// Remove cached copies of objects
    Clear {
        /// Object keys
        keys: Vec<String>,
    },

    /// Remove the bucket's entire cache directory
    Purge,
}

impl Cli {
    fn to_store_config(&self) -> Result<StoreConfig> {
        let bucket = self
            .bucket
            .clone()
            .context("REMOTE_STORE_BUCKET (or --bucket) is required")?;

        let backend = match self.backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3 {
                region: self.region.clone(),
                endpoint: self.endpoint.clone(),
                allow_http: self.allow_http,
            },
            _ => anyhow::bail!("Unknown storage backend: {}", self.backend),
        };

        let credentials = match (&self.role_arn, &self.access_key, &self.secret_key) {
            (Some(role), _, _) => CredentialSource::AssumeRole {
                role: RoleArn::new(role.clone())?,
                session_name: self.session_name.clone(),
            },
            (None, Some(access_key), Some(secret_key)) => CredentialSource::Static {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            },
            _ => CredentialSource::Default,
        };

        Ok(StoreConfig {
            bucket,
            backend,
            credentials,
            cache_dir: self.cache_dir.clone(),
        })
    }

    fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    async fn build_store(&self) -> Result<RemoteStore> {
        let config = self.to_store_config()?;
        let store = StoreBuilder::new(config.bucket.clone())
            .with_config(config)
            .build()
            .await
            .context("Failed to build remote store")?;
        Ok(store)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    match &cli.command {
        Commands::Ls { prefixes, json } => {
            let store = cli.build_store().await?;
            let prefixes: Vec<&str> = if prefixes.is_empty() {
                vec![""]
            } else {
                prefixes.iter().map(String::as_str).collect()
            };

            let listings = store.ls_many(&prefixes).await?;

            if *json {
                let objects: Vec<_> = listings
                    .iter()
                    .flatten()
                    .map(|file| file.as_object())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&objects)?);
            } else {
                for file in listings.iter().flatten() {
                    println!(
                        "{:>12}  {}  {}",
                        file.size(),
                        file.modified().format("%Y-%m-%d %H:%M:%S"),
                        file.key()
                    );
                }
            }
        }

        Commands::Cat { key, raw } => {
            let store = cli.build_store().await?;
            let key = ObjectKey::new(key.clone())?;

            let mut reader = if *raw {
                store.open_raw(&key).await?
            } else {
                store.open(&key).await?
            };

            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            std::io::copy(&mut reader, &mut handle)?;
            handle.flush()?;
        }

        Commands::Fetch { keys } => {
            let store = cli.build_store().await?;
            for key in keys {
                let key = ObjectKey::new(key.clone())?;
                let path = store.fetch(&key).await?;
                println!("{}", path.display());
            }
        }

        Commands::Cache { command } => {
            let store = cli.build_store().await?;
            match command {
                CacheCommands::Path { key } => {
                    let key = ObjectKey::new(key.clone())?;
                    println!("{}", store.cache_path(&key).display());
                }
                CacheCommands::Clear { keys } => {
                    for key in keys {
                        let key = ObjectKey::new(key.clone())?;
                        store.clear_cached(&key).await?;
                        info!(key = %key, "cleared cached copy");
                    }
                }
                CacheCommands::Purge => {
                    store.purge_cache().await?;
                    info!(cache_dir = %store.cache_dir().display(), "purged cache");
                }
            }
        }

        Commands::AssumeRole { role } => {
            let role = RoleArn::new(role.clone())?;
            let session_name = cli
                .session_name
                .clone()
                .unwrap_or_else(|| format!("remote-store-{}", uuid::Uuid::new_v4()));

            let creds = assume_role(&role, &session_name).await?;
            println!("{}", serde_json::to_string_pretty(&creds)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "remote-store",
            "--bucket",
            "my-data",
            "--region",
            "eu-north-1",
            "ls",
            "runs/",
        ]);

        assert_eq!(cli.bucket, Some("my-data".to_string()));
        assert_eq!(cli.region, "eu-north-1");
        match cli.command {
            Commands::Ls { ref prefixes, json } => {
                assert_eq!(prefixes, &["runs/"]);
                assert!(!json);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn test_memory_backend_config() {
        let cli = Cli::parse_from([
            "remote-store",
            "--bucket",
            "my-data",
            "--backend",
            "memory",
            "cache",
            "purge",
        ]);

        let config = cli.to_store_config().unwrap();
        match config.backend {
            StorageBackend::InMemory => (),
            _ => panic!("Expected InMemory backend"),
        }
    }

    #[test]
    fn test_assume_role_credential_source() {
        let cli = Cli::parse_from([
            "remote-store",
            "--bucket",
            "my-data",
            "--role-arn",
            "arn:aws:iam::123456789012:role/reader",
            "ls",
        ]);

        let config = cli.to_store_config().unwrap();
        match config.credentials {
            CredentialSource::AssumeRole { ref role, .. } => {
                assert_eq!(role.role_name(), "reader");
            }
            _ => panic!("Expected assume-role credentials"),
        }
    }
}
