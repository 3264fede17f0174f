//! HTTP client for the Proxmox VE API

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use proxinv_api::{
    AgentNetworkInterfaces, ApiCredentials, ApiResponse, ExclusionSet, GuestKind, GuestRecord,
    LxcConfig, NodeRecord, Subdir, VersionInfo, VmConfig,
};

use crate::error::{ClientError, Result};
use crate::filter::running_guest_names;

/// Path appended to the configured base URL
pub const API_PATH: &str = "/api2/json";

/// Timeout applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_SCHEME: &str = "PVEAPIToken";

/// Read-only client for the Proxmox VE API, authenticated with an API token
///
/// Every operation takes a [`CancellationToken`]; cancelling it aborts the
/// request in flight with [`ClientError::Cancelled`].
#[derive(Debug, Clone)]
pub struct ProxmoxClient {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
}

impl ProxmoxClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if a credential field is empty, the URL is invalid, or
    /// the HTTP client cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use proxinv_api::ApiCredentials;
    /// use proxinv_client::ProxmoxClient;
    ///
    /// let credentials = ApiCredentials::new(
    ///     "root@pam",
    ///     "inventory",
    ///     "00000000-0000-0000-0000-000000000000",
    ///     "https://pve1.example.com:8006",
    /// );
    /// let client = ProxmoxClient::new(&credentials)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(credentials: &ApiCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Transport)?;
        Self::with_client(credentials, client)
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if a credential field is empty or the URL is invalid.
    pub fn with_client(credentials: &ApiCredentials, client: Client) -> Result<Self> {
        credentials.validate()?;

        let url = credentials.url.as_str();
        let base_url = format!("{}{API_PATH}", url.strip_suffix('/').unwrap_or(url));
        Url::parse(&base_url)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{TOKEN_SCHEME}={}!{}={}",
            credentials.user, credentials.token, credentials.secret
        ))?;
        authorization.set_sensitive(true);

        Ok(Self {
            client,
            base_url,
            authorization,
        })
    }

    /// Base URL including the API path
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{path}", self.base_url)).map_err(ClientError::Url)
    }

    /// Perform a GET request and unwrap the `data` envelope
    async fn get<T: DeserializeOwned>(&self, path: &str, cancel: &CancellationToken) -> Result<T> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(path, "request cancelled");
                Err(ClientError::Cancelled)
            }
            result = self.fetch(path) => result,
        }
    }

    /// GET a listing, reading a `null` payload as an empty list
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>> {
        let data: Option<Vec<T>> = self.get(path, cancel).await?;
        Ok(data.unwrap_or_default())
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status().as_u16();
        // The body is always read in full, error statuses included.
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        debug!(path, status, bytes = body.len(), "response received");

        if !(200..400).contains(&status) {
            let message = String::from_utf8_lossy(&body).trim().to_string();
            debug!(path, status, %message, "request rejected");
            return Err(ClientError::Protocol { status, message });
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_data())
    }

    // Cluster endpoints

    /// List the API root directory
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn subdirs(&self, cancel: &CancellationToken) -> Result<Vec<Subdir>> {
        self.get_list("", cancel).await
    }

    /// Get the API version
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    ///
    /// # Example
    /// ```no_run
    /// # use proxinv_api::ApiCredentials;
    /// # use proxinv_client::ProxmoxClient;
    /// # use tokio_util::sync::CancellationToken;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = ProxmoxClient::new(&ApiCredentials::new("u", "t", "s", "https://pve:8006"))?;
    /// let version = client.version(&CancellationToken::new()).await?;
    /// println!("Proxmox VE {}", version.version);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, cancel))]
    pub async fn version(&self, cancel: &CancellationToken) -> Result<VersionInfo> {
        self.get("/version", cancel).await
    }

    /// List cluster nodes in API order
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn list_nodes(&self, cancel: &CancellationToken) -> Result<Vec<NodeRecord>> {
        self.get_list("/nodes/", cancel).await
    }

    // Guest listings

    /// List guests of one kind on a node
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    pub async fn list_guests(
        &self,
        node: &str,
        kind: GuestKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<GuestRecord>> {
        self.get_list(&format!("/nodes/{node}/{}", kind.endpoint()), cancel)
            .await
    }

    /// List all QEMU virtual machines on a node
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn list_virtual_machines(
        &self,
        node: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<GuestRecord>> {
        self.list_guests(node, GuestKind::VirtualMachine, cancel)
            .await
    }

    /// List all LXC containers on a node
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn list_containers(
        &self,
        node: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<GuestRecord>> {
        self.list_guests(node, GuestKind::Container, cancel).await
    }

    /// Names of running guests of one kind on a node, minus excluded names
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    pub async fn list_running_guests(
        &self,
        node: &str,
        kind: GuestKind,
        exclusions: &ExclusionSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        let guests = self.list_guests(node, kind, cancel).await?;
        let listed = guests.len();
        let names = running_guest_names(guests, exclusions);
        debug!(node, %kind, listed, kept = names.len(), "filtered guests");
        Ok(names)
    }

    /// Names of running virtual machines on a node, minus excluded names
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    ///
    /// # Example
    /// ```no_run
    /// # use proxinv_api::{ApiCredentials, ExclusionSet};
    /// # use proxinv_client::ProxmoxClient;
    /// # use tokio_util::sync::CancellationToken;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = ProxmoxClient::new(&ApiCredentials::new("u", "t", "s", "https://pve:8006"))?;
    /// let exclusions = ExclusionSet::new(["template-01"]);
    /// let vms = client
    ///     .list_running_virtual_machines("pve1", &exclusions, &CancellationToken::new())
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, exclusions, cancel))]
    pub async fn list_running_virtual_machines(
        &self,
        node: &str,
        exclusions: &ExclusionSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        self.list_running_guests(node, GuestKind::VirtualMachine, exclusions, cancel)
            .await
    }

    /// Names of running containers on a node, minus excluded names
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, exclusions, cancel))]
    pub async fn list_running_containers(
        &self,
        node: &str,
        exclusions: &ExclusionSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>> {
        self.list_running_guests(node, GuestKind::Container, exclusions, cancel)
            .await
    }

    // Per-guest endpoints

    /// Get the configuration of a virtual machine
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn virtual_machine_config(
        &self,
        node: &str,
        vmid: u32,
        cancel: &CancellationToken,
    ) -> Result<VmConfig> {
        self.get(&format!("/nodes/{node}/qemu/{vmid}/config"), cancel)
            .await
    }

    /// Get the configuration of a container
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn container_config(
        &self,
        node: &str,
        vmid: u32,
        cancel: &CancellationToken,
    ) -> Result<LxcConfig> {
        self.get(&format!("/nodes/{node}/lxc/{vmid}/config"), cancel)
            .await
    }

    /// Get a virtual machine's network interfaces from its QEMU guest agent
    ///
    /// # Errors
    /// Returns an error if the request fails, the API rejects it (including
    /// when the agent is not running), or the response cannot be decoded.
    #[instrument(skip(self, cancel))]
    pub async fn agent_network_interfaces(
        &self,
        node: &str,
        vmid: u32,
        cancel: &CancellationToken,
    ) -> Result<AgentNetworkInterfaces> {
        self.get(
            &format!("/nodes/{node}/qemu/{vmid}/agent/network-get-interfaces"),
            cancel,
        )
        .await
    }
}
