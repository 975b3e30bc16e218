use remote_store::{create_s3_store_for, CredentialSource, ObjectKey, RoleArn};
use std::error::Error;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Bind a store to a bucket, assuming a read role for access.
    // Downloads are cached under the system temp dir by default.
    let role = RoleArn::new("arn:aws:iam::123456789012:role/data-reader".to_string())?;
    let store = create_s3_store_for(
        "my-data-bucket",
        "us-east-1",
        CredentialSource::AssumeRole {
            role,
            session_name: None,
        },
        None,
    )
    .await?;

    // List everything under a prefix
    for file in store.ls("runs/2024/").await? {
        println!("{:>12}  {}", file.size(), file.key());
    }

    // Open an object: downloaded into the cache on first access,
    // gzip-decoded transparently
    let key = ObjectKey::new("runs/2024/summary.json.gz".to_string())?;
    let mut contents = String::new();
    store.open(&key).await?.read_to_string(&mut contents)?;
    println!("{}", contents);

    // The second open is served from the local cache
    assert!(store.is_cached(&key));

    Ok(())
}
