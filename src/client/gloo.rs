use super::{ApiRequest, MultipartForm, RawResponse, RequestBody, Transport};
use crate::error::ClientError;
use gloo_net::http::{Request, RequestBuilder};
use http::Method;
use leptos::logging::error;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Browser transport over `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let mut builder = builder_for(&request.method, &request.url);
        if let Some(token) = request.token.as_deref().filter(|t| !t.trim().is_empty()) {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            // the browser sets the multipart boundary header itself
            RequestBody::Multipart(form) => builder.body(form_data(form)?),
        };
        let response = prepared?.send().await.map_err(|e| {
            error!("[API] {} {} failed: {}", request.method, request.url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

fn builder_for(method: &Method, url: &str) -> RequestBuilder {
    if *method == Method::POST {
        Request::post(url)
    } else if *method == Method::PUT {
        Request::put(url)
    } else if *method == Method::PATCH {
        Request::patch(url)
    } else if *method == Method::DELETE {
        Request::delete(url)
    } else {
        Request::get(url)
    }
}

fn form_data(form: MultipartForm) -> Result<FormData, ClientError> {
    let data = FormData::new().map_err(js_error)?;
    for (name, value) in &form.texts {
        data.append_with_str(name, value).map_err(js_error)?;
    }
    for (name, file) in &form.files {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        data.append_with_blob_and_filename(name, &blob, &file.file_name)
            .map_err(js_error)?;
    }
    Ok(data)
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Unexpected(format!("{value:?}"))
}
