use crate::{error::Result, storage::DocumentStore, StateTrait};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

/// Streams a stored document back. The key is the one handed out when the
/// document was uploaded, e.g. `lectures/<uuid>/notes.pdf`.
pub async fn show<S: StateTrait>(
    State(state): State<S>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    let data = state.storage().get(&key).await?;
    let mime = mime_guess::from_path(&key).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], data))
}
