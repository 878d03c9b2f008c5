use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;

use crate::{
    error::{AppError, AppResult},
    storage::{ObjectExists, StorageClient},
};

/// Name collisions tolerated within one millisecond before giving up.
const MAX_NAME_ATTEMPTS: u32 = 16;

pub struct UploadItem {
    pub file_name: String,
    pub content_type: String,
    pub body: Bytes,
}

pub fn is_allowed_image(content_type: &str) -> bool {
    lazy_static! {
        static ref IMAGE_RE: Regex = Regex::new(r"(?i)^image/(jpe?g|png|gif|webp)$").unwrap();
    }
    IMAGE_RE.is_match(content_type.trim())
}

fn ext_from_mime(ct: &str) -> &'static str {
    match ct.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// Last path component of the client's file name with everything outside
/// `[A-Za-z0-9._-]` replaced by `_`.
fn sanitize_file_name(name: &str, content_type: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        format!("upload.{}", ext_from_mime(content_type))
    } else {
        cleaned.to_string()
    }
}

fn stored_name(now: OffsetDateTime, attempt: u32, file_name: &str, content_type: &str) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let name = sanitize_file_name(file_name, content_type);
    if attempt == 0 {
        format!("{}-{}", millis, name)
    } else {
        format!("{}-{}-{}", millis, attempt, name)
    }
}

/// Writes an accepted image and returns its public URL.
pub async fn store_image(
    storage: &dyn StorageClient,
    public_path: &str,
    item: UploadItem,
) -> AppResult<String> {
    if !is_allowed_image(&item.content_type) {
        return Err(AppError::Validation(
            "Only image files are allowed!".into(),
        ));
    }

    let now = OffsetDateTime::now_utc();
    let mut attempt = 0;
    let key = loop {
        let key = stored_name(now, attempt, &item.file_name, &item.content_type);
        match storage
            .put_object(&key, item.body.clone(), &item.content_type)
            .await
        {
            Ok(()) => break key,
            Err(e) if e.is::<ObjectExists>() && attempt + 1 < MAX_NAME_ATTEMPTS => {
                tracing::debug!(%key, "upload name taken, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e.context(format!("store upload {}", key)).into()),
        }
    };

    let url = format!("{}/{}", public_path.trim_end_matches('/'), key);
    tracing::info!(%url, "image uploaded");
    Ok(url)
}
