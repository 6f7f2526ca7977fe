use super::decode::{decode, FileKind};
use crate::errors::SyncError;
use crate::state::AppState;
use crate::sync::{apply_filters, summarize, sync_channel};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::channel::Channel;
use common::responses::ChannelReport;
use futures_util::StreamExt;
use log::{error, info};

struct UploadedFile {
    kind: FileKind,
    bytes: Vec<u8>,
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, SyncError> {
    let upload = read_file_field(payload, state.max_upload_bytes).await?;
    let table = decode(upload.kind, &upload.bytes).map_err(|e| {
        error!("{}", e);
        e
    })?;

    // Reject before any channel runs so the caller gets one actionable error.
    let missing = table.missing_required();
    if !missing.is_empty() {
        error!("Missing columns: {:?}", missing);
        return Err(SyncError::Schema(missing));
    }
    info!("Total rows in uploaded file: {}", table.len());

    let filtered = apply_filters(&table)?;

    let mut reports = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        let report = match sync_channel(&filtered, channel, state.ledgers.as_ref()).await {
            Ok(appended) => ChannelReport {
                channel,
                sheet: channel.sheet_name().to_string(),
                appended,
                error: None,
            },
            Err(e) => {
                error!("{}", e);
                ChannelReport {
                    channel,
                    sheet: channel.sheet_name().to_string(),
                    appended: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    let response = summarize(reports);
    info!("{}", response.message);
    if response.success {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::InternalServerError().json(response))
    }
}

/// Buffers the `file` field, rejecting unknown suffixes before reading the
/// body. Other fields are ignored.
async fn read_file_field(mut payload: Multipart, limit: usize) -> Result<UploadedFile, SyncError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| SyncError::Decode(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let kind = FileKind::from_filename(&filename).ok_or_else(|| {
            error!("Unsupported file type: {}", filename);
            SyncError::UnsupportedFile
        })?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| SyncError::Decode(e.to_string()))?;
            if bytes.len() + chunk.len() > limit {
                return Err(SyncError::TooLarge(limit));
            }
            bytes.extend_from_slice(&chunk);
        }
        info!("Received {} ({} bytes)", filename, bytes.len());
        return Ok(UploadedFile { kind, bytes });
    }
    Err(SyncError::MissingFile)
}
