use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::counter;

use crate::application::admin::settings::UpdateBrandCommand;
use crate::application::error::HttpError;
use crate::infra::uploads::UploadStorageError;
use crate::presentation::admin::views::{AdminBrandPanelTemplate, BrandPanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_panel, settings_outcome};

const SOURCE: &str = "infra::http::admin::uploads";

enum BrandAssetKind {
    Logo,
    Favicon,
}

/// Accept a logo or favicon file and point the brand section at its new
/// `/media/` path in one step.
pub(super) async fn admin_brand_asset_upload(
    State(state): State<AdminState>,
    mut multipart: Multipart,
) -> Response {
    let mut kind = None;
    let mut payload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return HttpError::new(
                    SOURCE,
                    StatusCode::BAD_REQUEST,
                    "Malformed upload request",
                    err.to_string(),
                )
                .into_response();
            }
        };

        match field.name() {
            Some("kind") => match field.text().await.as_deref() {
                Ok("logo") => kind = Some(BrandAssetKind::Logo),
                Ok("favicon") => kind = Some(BrandAssetKind::Favicon),
                Ok(other) => {
                    return HttpError::new(
                        SOURCE,
                        StatusCode::BAD_REQUEST,
                        "Unknown brand asset kind",
                        format!("unsupported kind `{other}`"),
                    )
                    .into_response();
                }
                Err(err) => {
                    return HttpError::new(
                        SOURCE,
                        StatusCode::BAD_REQUEST,
                        "Malformed upload request",
                        err.to_string(),
                    )
                    .into_response();
                }
            },
            Some("file") => {
                let name = field
                    .file_name()
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "asset.svg".to_string());
                match field.bytes().await {
                    Ok(bytes) => payload = Some((name, bytes)),
                    Err(err) => {
                        return HttpError::new(
                            SOURCE,
                            StatusCode::BAD_REQUEST,
                            "Upload could not be read",
                            err.to_string(),
                        )
                        .into_response();
                    }
                }
            }
            _ => {}
        }
    }

    let (Some(kind), Some((original_name, bytes))) = (kind, payload) else {
        return HttpError::new(
            SOURCE,
            StatusCode::BAD_REQUEST,
            "Missing upload fields",
            "expected `kind` and `file` fields",
        )
        .into_response();
    };

    let stored = match state.upload_storage.store(&original_name, bytes).await {
        Ok(stored) => stored,
        Err(err) => return upload_error_response(err),
    };
    counter!("orma_uploads_stored_total").increment(1);

    let media_path = format!("/media/{}", stored.stored_path);
    let current = state.settings.current();
    let command = UpdateBrandCommand {
        name: current.brand.name.clone(),
        tagline: current.brand.tagline.clone(),
        description: current.brand.description.clone(),
        logo: match kind {
            BrandAssetKind::Logo => media_path.clone(),
            BrandAssetKind::Favicon => current.brand.logo.clone(),
        },
        favicon: match kind {
            BrandAssetKind::Favicon => media_path,
            BrandAssetKind::Logo => current.brand.favicon.clone(),
        },
    };

    let section = match kind {
        BrandAssetKind::Logo => "Logo",
        BrandAssetKind::Favicon => "Favicon",
    };
    let result = state.settings.update_brand(ACTOR, command).await;
    let (settings, toast) = settings_outcome(section, result, || state.settings.current());

    match render_panel(AdminBrandPanelTemplate {
        view: BrandPanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}

fn upload_error_response(err: UploadStorageError) -> Response {
    let status = match err {
        UploadStorageError::EmptyPayload
        | UploadStorageError::UnsupportedType
        | UploadStorageError::UnsafeSvg => StatusCode::UNPROCESSABLE_ENTITY,
        UploadStorageError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        UploadStorageError::InvalidPath => StatusCode::BAD_REQUEST,
        UploadStorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpError::new(SOURCE, status, "Brand asset rejected", err.to_string()).into_response()
}
