//! DynamoDB client module.
//!
//! Builds the SDK client a sweep runs against. Supports:
//! - Region from the command line, falling back to the default provider chain
//! - A named AWS profile for credentials
//! - A custom endpoint (DynamoDB Local, LocalStack)

use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client;
use tracing::{debug, info};

use crate::errors::{SweepError, NO_CREDENTIALS};

/// Connection settings for the DynamoDB client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConfig {
    /// AWS region (e.g. "us-east-1").
    pub region: Option<String>,
    /// AWS profile name from ~/.aws/credentials.
    pub profile: Option<String>,
    /// Custom endpoint URL for local testing.
    pub endpoint_url: Option<String>,
}

/// Build the AWS SDK DynamoDB client with the given configuration.
///
/// Credentials priority: profile > default chain (env vars, SSO, instance
/// profile, etc).
///
/// Credentials are resolved before returning, so a missing or broken chain
/// fails here instead of on the first API call.
///
/// # Errors
///
/// Returns `SweepError::Config` if no region can be resolved or credentials
/// cannot be loaded.
pub async fn build_client(config: &AwsConfig) -> Result<Client, SweepError> {
    if let Some(region) = &config.region
        && region.trim().is_empty()
    {
        return Err(SweepError::Config("region must not be empty".to_string()));
    }

    // Region priority: flag > env var > profile
    let region_provider = RegionProviderChain::first_try(config.region.clone().map(Region::new))
        .or_default_provider();

    let mut config_loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    if let Some(profile_name) = &config.profile {
        let profile_provider = ProfileFileCredentialsProvider::builder()
            .profile_name(profile_name)
            .build();
        config_loader = config_loader.credentials_provider(profile_provider);
    }

    let sdk_config = config_loader.load().await;

    let region = sdk_config
        .region()
        .map(|r| r.to_string())
        .ok_or_else(|| SweepError::Config("no AWS region configured".to_string()))?;

    let provider = sdk_config
        .credentials_provider()
        .ok_or_else(|| SweepError::Config(NO_CREDENTIALS.to_string()))?;
    provider.provide_credentials().await.map_err(|e| {
        SweepError::Config(format!("failed to resolve AWS credentials: {}", e))
    })?;
    debug!(profile = ?config.profile, "resolved AWS credentials");

    let mut dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

    if let Some(url) = &config.endpoint_url {
        dynamo_config = dynamo_config.endpoint_url(url);
    }

    info!(region = %region, endpoint = ?config.endpoint_url, "DynamoDB client ready");
    Ok(Client::from_conf(dynamo_config.build()))
}
