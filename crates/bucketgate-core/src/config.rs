//! Façade configuration.
//!
//! Provides [`StoreConfig`] (how to reach the object store) and
//! [`FacadeConfig`] (what the façade serves, and from where). Configuration
//! values are loaded from environment variables; the variable names match the
//! service's deployment conventions.
//!
//! Both structs are immutable once constructed. There is no process-wide
//! mutable configuration: the store config is owned by the store client built
//! from it, and the façade config is shared read-only across requests.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default per-operation network timeout, in seconds.
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the S3-compatible object store.
///
/// # Examples
///
/// ```
/// use bucketgate_core::config::StoreConfig;
///
/// let config = StoreConfig::builder()
///     .endpoint("localhost:9000".into())
///     .access_key_id("minioadmin".into())
///     .secret_access_key("minioadmin".into())
///     .build();
/// assert_eq!(config.endpoint_url(), "https://localhost:9000");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Object store endpoint, host:port or full URL (e.g. `"localhost:9000"`).
    #[builder(default)]
    pub endpoint: String,

    /// Access key id for the store.
    #[builder(default)]
    pub access_key_id: String,

    /// Secret access key for the store.
    #[builder(default)]
    pub secret_access_key: String,

    /// Region name. MinIO ignores it but the SDK requires one.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Whether to talk plain HTTP to the endpoint.
    #[builder(default = false)]
    pub disable_tls: bool,

    /// Whether to force path-style URLs (required for MinIO).
    #[builder(default = true)]
    pub force_path_style: bool,

    /// Per-operation network timeout in seconds. Expiry surfaces as a
    /// store-unavailable error.
    #[builder(default = DEFAULT_OPERATION_TIMEOUT_SECS)]
    pub operation_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: String::from("us-east-1"),
            disable_tls: false,
            force_path_style: true,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .field("disable_tls", &self.disable_tls)
            .field("force_path_style", &self.force_path_style)
            .field("operation_timeout_secs", &self.operation_timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    /// The endpoint as a full URL, deriving the scheme from [`Self::disable_tls`]
    /// when the configured endpoint carries none.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else if self.disable_tls {
            format!("http://{}", self.endpoint)
        } else {
            format!("https://{}", self.endpoint)
        }
    }

    /// Check that every required connection value is present.
    ///
    /// # Errors
    ///
    /// Returns the names of the missing values. A missing value is a startup
    /// failure, never a per-request failure.
    pub fn validate(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.endpoint.is_empty() {
            missing.push("BUCKET_SERVER_ENDPOINT");
        }
        if self.access_key_id.is_empty() {
            missing.push("ACCESS_KEY_ID");
        }
        if self.secret_access_key.is_empty() {
            missing.push("SECRET_ACCESS_KEY");
        }
        if self.region.is_empty() {
            missing.push("REGION");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing configuration values: {}", missing.join(", ")))
        }
    }
}

/// Façade service configuration: bind address, log level, and the well-known
/// buckets the HTTP surface serves from.
///
/// All fields have working defaults; configuration is loaded from
/// environment variables via [`FacadeConfig::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct FacadeConfig {
    /// Bind address (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Bucket holding the Terraform state object.
    #[builder(default = String::from("tf-state"))]
    pub state_bucket: String,

    /// Key of the Terraform state object.
    #[builder(default = String::from("terraform.tfstate"))]
    pub state_key: String,

    /// Bucket holding VM template folders served as archives.
    #[builder(default = String::from("vm-templates"))]
    pub template_bucket: String,

    /// Bucket holding individually served files.
    #[builder(default = String::from("vm-files"))]
    pub file_bucket: String,

    /// Object store connection settings.
    #[builder(default)]
    pub store: StoreConfig,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            listen: String::from("0.0.0.0:8080"),
            log_level: String::from("info"),
            state_bucket: String::from("tf-state"),
            state_key: String::from("terraform.tfstate"),
            template_bucket: String::from("vm-templates"),
            file_bucket: String::from("vm-files"),
            store: StoreConfig::default(),
        }
    }
}

impl FacadeConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LISTEN` | `0.0.0.0:8080` |
    /// | `LOG_LEVEL` | `info` |
    /// | `STATE_BUCKET` | `tf-state` |
    /// | `STATE_KEY` | `terraform.tfstate` |
    /// | `TEMPLATE_BUCKET` | `vm-templates` |
    /// | `FILE_BUCKET` | `vm-files` |
    /// | `BUCKET_SERVER_ENDPOINT` | *(required)* |
    /// | `ACCESS_KEY_ID` | *(required)* |
    /// | `SECRET_ACCESS_KEY` | *(required)* |
    /// | `REGION` | `us-east-1` |
    /// | `DISABLE_SSL` | `false` |
    /// | `FORCE_PATHSTYLE_AWS_URL` | `true` |
    /// | `OPERATION_TIMEOUT_SECS` | `30` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("LISTEN") {
            config.listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("STATE_BUCKET") {
            config.state_bucket = v;
        }
        if let Ok(v) = std::env::var("STATE_KEY") {
            config.state_key = v;
        }
        if let Ok(v) = std::env::var("TEMPLATE_BUCKET") {
            config.template_bucket = v;
        }
        if let Ok(v) = std::env::var("FILE_BUCKET") {
            config.file_bucket = v;
        }
        if let Ok(v) = std::env::var("BUCKET_SERVER_ENDPOINT") {
            config.store.endpoint = v;
        }
        if let Ok(v) = std::env::var("ACCESS_KEY_ID") {
            config.store.access_key_id = v;
        }
        if let Ok(v) = std::env::var("SECRET_ACCESS_KEY") {
            config.store.secret_access_key = v;
        }
        if let Ok(v) = std::env::var("REGION") {
            config.store.region = v;
        }
        if let Ok(v) = std::env::var("DISABLE_SSL") {
            config.store.disable_tls = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("FORCE_PATHSTYLE_AWS_URL") {
            config.store.force_path_style = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("OPERATION_TIMEOUT_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.store.operation_timeout_secs = n;
            }
        }

        config
    }

    /// Check that the store connection settings are complete.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::validate`].
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
