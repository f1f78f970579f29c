use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    AppState,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{DeleteResponse, GalleryListResponse, GalleryQuery, NewGalleryItem};

const ALLOWED_IMAGE_TYPES: [(&str, &str); 5] = [
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

#[axum::debug_handler]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> impl IntoResponse {
    let (data, total) = state
        .gallery
        .list(query.category.as_deref(), query.limit)
        .await;

    (
        StatusCode::OK,
        success_to_api_response(GalleryListResponse {
            count: data.len(),
            total,
            data,
        }),
    )
}

#[axum::debug_handler]
pub async fn get_item(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.gallery.get(id).await {
        Some(item) => (StatusCode::OK, success_to_api_response(item)),
        None => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "Image non trouvée".to_string()),
        ),
    }
}

/// Upload multipart : métadonnées + fichier image. Le fichier est écrit sous
/// `uploads/gallery/` avec un nom généré, puis l'élément est ajouté au store.
#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut title = String::new();
    let mut description = String::new();
    let mut category = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("multipart parse error: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    error_to_api_response(
                        error_codes::VALIDATION_ERROR,
                        "Requête multipart invalide".to_string(),
                    ),
                );
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => title = field.text().await.unwrap_or_default(),
            Some("description") => description = field.text().await.unwrap_or_default(),
            Some("category") => category = field.text().await.unwrap_or_default(),
            Some("image") => {
                let content_type = field.content_type().map(str::to_string).unwrap_or_default();
                let Some(extension) = extension_for(&content_type) else {
                    return (
                        StatusCode::BAD_REQUEST,
                        error_to_api_response(
                            error_codes::VALIDATION_ERROR,
                            "Type de fichier non autorisé. Seules les images sont acceptées."
                                .to_string(),
                        ),
                    );
                };
                match field.bytes().await {
                    Ok(bytes) => image = Some((extension.to_string(), bytes.to_vec())),
                    // la limite de taille du corps se manifeste ici
                    Err(e) => {
                        tracing::debug!("image field read error: {}", e);
                        return (
                            StatusCode::BAD_REQUEST,
                            error_to_api_response(
                                error_codes::VALIDATION_ERROR,
                                "Fichier image illisible ou trop volumineux".to_string(),
                            ),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    let Some((extension, bytes)) = image else {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Aucun fichier image fourni".to_string(),
            ),
        );
    };

    if title.is_empty() || category.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "Le titre et la catégorie sont obligatoires".to_string(),
            ),
        );
    }

    let directory = state.config.upload_dir.join("gallery");
    let filename = format!("gallery-{}.{}", Uuid::new_v4(), extension);

    let write_result = async {
        tokio::fs::create_dir_all(&directory).await?;
        tokio::fs::write(directory.join(&filename), &bytes).await
    }
    .await;

    if let Err(e) = write_result {
        tracing::error!("failed to store uploaded image: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_to_api_response(
                error_codes::INTERNAL_ERROR,
                "Erreur lors de l'upload de l'image".to_string(),
            ),
        );
    }

    let item = state
        .gallery
        .insert(NewGalleryItem {
            title,
            description,
            category,
            image: format!("/uploads/gallery/{}", filename),
        })
        .await;

    (StatusCode::CREATED, success_to_api_response(item))
}

#[axum::debug_handler]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let Some(item) = state.gallery.remove(id).await else {
        return (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "Image non trouvée".to_string()),
        );
    };

    // suppression du fichier au mieux : l'élément est déjà retiré de la liste
    if let Some(relative) = item.image.strip_prefix("/uploads/") {
        let path = state.config.upload_dir.join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("could not remove {}: {}", path.display(), e);
        }
    }

    (
        StatusCode::OK,
        success_to_api_response(DeleteResponse {
            message: "Image supprimée avec succès".to_string(),
        }),
    )
}

#[axum::debug_handler]
pub async fn categories(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        success_to_api_response(state.gallery.categories().await),
    )
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}
