//! File tools: listing, metadata, download, upload and deletion.

use super::args::{DownloadFileArgs, FileArgs, UploadFileArgs, UploadPayload, to_params};
use super::{json_result, truthy};
use crate::client::{Attachment, MultipartBody, Params, SlackClient};
use crate::error::{GatewayError, Result};
use crate::fetch::BinaryResource;
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

/// The subset of a `files.info` `file` object the download path looks at.
///
/// `is_external` and `external_type` are kept apart; either being truthy marks the file as
/// hosted outside Slack.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub is_external: Option<Value>,
    #[serde(default)]
    pub external_type: Option<Value>,
    #[serde(default)]
    pub url_private_download: Option<String>,
    #[serde(default)]
    pub url_private: Option<String>,
    #[serde(default)]
    pub permalink_public: Option<String>,
}

#[derive(Debug, Serialize)]
struct FileSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mimetype: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a Value>,
}

impl FileMetadata {
    #[must_use]
    pub fn is_external(&self) -> bool {
        truthy(self.is_external.as_ref()) || truthy(self.external_type.as_ref())
    }

    /// Best URL to fetch bytes from: private download, then private, then public permalink.
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        [
            &self.url_private_download,
            &self.url_private,
            &self.permalink_public,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|u| !u.is_empty())
    }

    fn summary(&self) -> FileSummary<'_> {
        FileSummary {
            id: self.id.as_deref(),
            name: self.name.as_deref(),
            mimetype: self.mimetype.as_deref(),
            size: self.size.as_ref(),
        }
    }

    fn resource_uri(&self) -> String {
        format!("slack://files/{}", self.id.as_deref().unwrap_or("unknown"))
    }
}

/// Embedded blob resource block carrying the file bytes.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if the block cannot be built.
pub fn blob_resource(uri: &str, resource: &BinaryResource) -> Result<Content> {
    serde_json::from_value(json!({
        "type": "resource",
        "resource": {
            "uri": uri,
            "mimeType": resource.mime_type,
            "blob": resource.base64(),
        }
    }))
    .map_err(|e| GatewayError::Internal(format!("build resource content: {e}")))
}

pub(super) async fn list_files(client: &SlackClient, args: Params) -> Result<CallToolResult> {
    let data = client.get("files.list", &args).await?;
    Ok(json_result(&data))
}

pub(super) async fn get_file_info(client: &SlackClient, args: FileArgs) -> Result<CallToolResult> {
    let data = client.get("files.info", &to_params(&args)?).await?;
    Ok(json_result(&data))
}

pub(super) async fn delete_file(client: &SlackClient, args: FileArgs) -> Result<CallToolResult> {
    let data = client.post_json("files.delete", &to_params(&args)?).await?;
    Ok(json_result(&data))
}

pub(super) async fn download_file(
    client: &SlackClient,
    args: DownloadFileArgs,
) -> Result<CallToolResult> {
    let mut params = Params::new();
    params.insert("file".to_string(), json!(args.file));
    let info = client.get("files.info", &params).await?;

    let Some(file) = info.get("file").filter(|f| f.is_object()) else {
        return Err(GatewayError::Validation(
            "File not found or not accessible.".to_string(),
        ));
    };
    let meta = FileMetadata::deserialize(file)
        .map_err(|e| GatewayError::Malformed(format!("unexpected files.info payload: {e}")))?;

    if meta.is_external() {
        warn!(file = %args.file, "refusing to download external file");
        return Ok(json_result(&json!({
            "ok": false,
            "error": "external_file",
            "note": "Cannot download external files via Slack API.",
            "file": file,
        })));
    }

    let url = meta.download_url().ok_or_else(|| {
        GatewayError::Validation("No downloadable URL available for this file.".to_string())
    })?;
    let resource = client.fetch_binary(url).await?;
    info!(
        file = %args.file,
        mime_type = %resource.mime_type,
        bytes = resource.bytes.len(),
        "downloaded file"
    );

    let mut content = vec![blob_resource(&meta.resource_uri(), &resource)?];
    if args.prefer_text && resource.is_textual() {
        content.push(Content::text(resource.text_lossy()));
    } else {
        let summary = json!({ "ok": true, "file": meta.summary() });
        content.push(Content::text(summary.to_string()));
    }
    Ok(CallToolResult::success(content))
}

/// Build the `files.upload` form for a resolved upload.
#[must_use]
pub fn upload_form(args: &super::args::UploadRequest) -> MultipartBody {
    let meta = &args.meta;
    let mut body = MultipartBody::default();
    body.text("filename", Some(&meta.filename))
        .text("channels", meta.channels.as_deref())
        .text("title", meta.title.as_deref())
        .text("initial_comment", meta.initial_comment.as_deref());

    match &args.payload {
        UploadPayload::Text(text) => {
            body.text("content", Some(text));
        }
        UploadPayload::Binary { bytes, mime_type } => {
            body.attachment = Some(Attachment {
                field: "file".to_string(),
                filename: meta.filename.clone(),
                mime_type: mime_type.clone(),
                bytes: bytes.clone(),
            });
        }
    }
    body
}

pub(super) async fn upload_file(
    client: &SlackClient,
    args: UploadFileArgs,
) -> Result<CallToolResult> {
    let request = args.resolve()?;
    let form = upload_form(&request);
    let data = client.post_multipart("files.upload", form).await?;
    Ok(json_result(&data))
}
