use futures::{StreamExt, TryStreamExt};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::api::models::*;
use crate::config::settings::Config;
use crate::transfer::progress;
use crate::util::archive;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Version '{version}' already exists")]
    Conflict { version: String },

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt bundle: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Local eligibility check for an upload candidate. Runs before any
/// network traffic so that a bad path never reaches the server.
pub fn validate_apk(apk_path: &Path) -> Result<(), ClientError> {
    if !apk_path.is_file() {
        return Err(ClientError::Validation(format!(
            "APK file '{}' not found",
            apk_path.display()
        )));
    }

    match apk_path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("apk") => Ok(()),
        _ => Err(ClientError::Validation(format!(
            "'{}' is not an APK file",
            apk_path.display()
        ))),
    }
}

pub struct PerseusClient {
    base_url: String,
    http_client: reqwest::Client,
    show_progress: bool,
}

impl PerseusClient {
    pub fn new(config: &Config) -> Self {
        let http_client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.server_url(),
            http_client,
            show_progress: true,
        }
    }

    /// Suppress progress bar rendering. Byte accounting is unchanged.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn map_http_error(&self, status: u16, message: String, what: &str) -> ClientError {
        match status {
            404 => ClientError::NotFound {
                what: what.to_string(),
            },
            409 => ClientError::Conflict {
                version: what.to_string(),
            },
            _ => ClientError::Server { status, message },
        }
    }

    async fn error_from(&self, response: reqwest::Response, what: &str) -> ClientError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => "Unknown error".to_string(),
        };
        self.map_http_error(status, message, what)
    }

    /// Probe the server before issuing a real request.
    pub async fn check_status(&self) -> bool {
        let url = self.build_url("/api/v1/status");
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("status probe failed: {}", e);
                false
            }
        }
    }

    /// Upload one APK, streaming the file body while a byte bar advances
    /// by chunks actually read.
    pub async fn push(&self, apk_path: &Path) -> Result<ApiMessage, ClientError> {
        validate_apk(apk_path)?;

        let file_name = apk_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.apk")
            .to_string();

        let file = tokio::fs::File::open(apk_path).await?;
        let file_size = file.metadata().await?.len();

        let pb = progress::bytes_bar(
            file_size,
            format!("Uploading {}", file_name),
            self.show_progress,
        );
        let bar = pb.clone();
        let stream = ReaderStream::new(file).inspect_ok(move |chunk| bar.inc(chunk.len() as u64));

        let part = reqwest::multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(stream),
            file_size,
        )
        .file_name(file_name)
        .mime_str("application/vnd.android.package-archive")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.build_url("/api/v1/push");
        log::debug!("POST {}", url);
        let response = self.http_client.post(&url).multipart(form).send().await?;
        pb.finish();

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.error_from(response, "push").await)
        }
    }

    /// Download the artifacts addressed by `target` into `dest`.
    ///
    /// Single-app targets stream to `<dest>/<app>/<app>.apk`; all-app
    /// targets receive a zip bundle which is extracted under `dest`.
    pub async fn pull(&self, target: &PullTarget, dest: &Path) -> Result<String, ClientError> {
        let url = self.build_url(&target.route());
        log::debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from(response, &target.describe()).await);
        }

        match target.app() {
            Some(app) => self.download_apk(response, app, dest).await,
            None => self.download_bundle(response, target, dest).await,
        }
    }

    async fn download_apk(
        &self,
        response: reqwest::Response,
        app: &str,
        dest: &Path,
    ) -> Result<String, ClientError> {
        let total = response.content_length().unwrap_or(0);

        let out_dir = dest.join(app);
        tokio::fs::create_dir_all(&out_dir).await?;
        let out_path = out_dir.join(format!("{}.apk", app));

        let pb = progress::bytes_bar(
            total,
            format!("Downloading {}.apk", app),
            self.show_progress,
        );

        let mut file = tokio::fs::File::create(&out_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            pb.inc(chunk.len() as u64);
        }
        file.flush().await?;
        pb.finish();

        Ok(format!("Successfully downloaded to {}", out_path.display()))
    }

    async fn download_bundle(
        &self,
        response: reqwest::Response,
        target: &PullTarget,
        dest: &Path,
    ) -> Result<String, ClientError> {
        let total = response.content_length().unwrap_or(0);

        let pb = progress::bytes_bar(
            total,
            format!("Downloading {}", target.describe()),
            self.show_progress,
        );

        // The bundle must be buffered: zip extraction needs random access.
        let mut data = Vec::with_capacity(total as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            data.extend_from_slice(&chunk);
            pb.inc(chunk.len() as u64);
        }
        pb.finish();

        let dest = dest.to_path_buf();
        let show_progress = self.show_progress;
        let extracted =
            tokio::task::spawn_blocking(move || archive::extract_bundle(data, &dest, show_progress))
                .await
                .map_err(|e| {
                    ClientError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
                })??;

        Ok(format!(
            "Downloaded and extracted {} file(s)",
            extracted
        ))
    }

    /// Ask the server to snapshot current app versions under `version`.
    pub async fn freeze(&self, version: &str) -> Result<ApiMessage, ClientError> {
        let url = self.build_url(&format!("/api/v1/freeze/{}", urlencoding::encode(version)));
        log::debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.error_from(response, version).await)
        }
    }

    pub async fn list_versions(&self) -> Result<Vec<String>, ClientError> {
        let url = self.build_url("/api/v1/versions");
        let response = self.http_client.get(&url).send().await?;

        if response.status().is_success() {
            let list: VersionList = response.json().await?;
            Ok(list.versions)
        } else {
            Err(self.error_from(response, "versions").await)
        }
    }

    pub async fn list_apps(&self, all_versions: bool) -> Result<Vec<AppInfo>, ClientError> {
        let path = if all_versions {
            "/api/v1/apps/all"
        } else {
            "/api/v1/apps"
        };
        let response = self.http_client.get(&self.build_url(path)).send().await?;

        if response.status().is_success() {
            let list: AppList = response.json().await?;
            Ok(list.apps)
        } else {
            Err(self.error_from(response, "apps").await)
        }
    }
}
