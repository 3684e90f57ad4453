use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mongodb::bson::{self, Bson, Document};
use serde_json::{json, Value};

use service::errors::ServiceError;
use service::singleton::SingletonStore;

use crate::errors::JsonApiError;

/// Render a stored document for the panel: `_id` as a hex string, all other
/// fields as plain JSON. Content documents only hold strings, arrays and
/// nested objects, so relaxed extended JSON is the identity for them.
pub(crate) fn document_to_json(mut doc: Document) -> Value {
    let id = doc.remove("_id").as_ref().and_then(Bson::as_object_id);
    let mut value = Bson::Document(doc).into_relaxed_extjson();
    if let (Some(oid), Some(map)) = (id, value.as_object_mut()) {
        map.insert("_id".into(), Value::String(oid.to_hex()));
    }
    value
}

pub async fn fetch_content(
    State(store): State<SingletonStore>,
) -> Result<Json<Value>, JsonApiError> {
    match store.fetch().await {
        Ok(doc) => Ok(Json(document_to_json(doc))),
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Datos no encontrados", None))
        }
        Err(e) => Err(e.into()),
    }
}

/// PUT the panel's (possibly partial) document back. The service strips any
/// round-tripped `_id` before merging field by field.
pub async fn update_content(
    State(store): State<SingletonStore>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, JsonApiError> {
    let fields = bson::to_document(&body).map_err(|e| {
        JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Cuerpo de petición inválido",
            Some(e.to_string()),
        )
    })?;
    match store.merge_update(fields).await {
        Ok(doc) => Ok(Json(json!({
            "mensaje": "Configuración actualizada correctamente",
            "configuracion": document_to_json(doc),
        }))),
        Err(ServiceError::NotFound(_)) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "No se encontró el documento para actualizar",
            None,
        )),
        Err(e) => Err(e.into()),
    }
}
