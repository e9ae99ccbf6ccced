// SPDX-License-Identifier: Apache-2.0

use crate::exporters::xray::transformer::ExportError;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, Request, Uri};
use http_body_util::Full;
use serde_json::{Value, json};
use thiserror::Error;

const TRACES_PATH: &str = "/TraceSegments";

#[derive(Debug, Error)]
pub enum XRayRequestError {
    #[error("failed to parse endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("invalid request uri: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error("failed to build request: {0}")]
    Http(#[from] http::Error),
    #[error("failed to build segment documents: {0}")]
    Transform(#[from] ExportError),
}

#[derive(Clone, Debug)]
pub struct XRayRequestBuilder {
    pub base_headers: HeaderMap,
    pub uri: Uri,
}

impl XRayRequestBuilder {
    pub fn new(endpoint: &str) -> Result<Self, XRayRequestError> {
        let invalid_endpoint = |source| XRayRequestError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        };
        let base: url::Url = endpoint.parse().map_err(invalid_endpoint)?;
        let trace_url = base.join(TRACES_PATH).map_err(invalid_endpoint)?;
        let uri: Uri = trace_url.as_str().parse()?;

        let mut base_headers = HeaderMap::new();
        base_headers.insert(
            "X-Amz-Target",
            HeaderValue::from_static("XRay_20160712.PutTraceSegments"),
        );
        base_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-amz-json-1.1"),
        );

        Ok(Self { uri, base_headers })
    }

    /// Wrap one chunk of segment documents into a PutTraceSegments request
    pub fn build(&self, segments: Vec<Value>) -> Result<Request<Full<Bytes>>, XRayRequestError> {
        // The API takes each document as an embedded JSON string
        let documents: Vec<String> = segments
            .into_iter()
            .map(|segment| segment.to_string())
            .collect();

        let data = json!({
            "TraceSegmentDocuments": documents
        })
        .to_string();

        let mut req_builder = Request::builder()
            .uri(self.uri.clone())
            .method(Method::POST);

        if let Some(headers) = req_builder.headers_mut() {
            headers.extend(self.base_headers.clone());
        }

        Ok(req_builder.body(Full::from(Bytes::from(data)))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn targets_trace_segments_path() {
        let builder = XRayRequestBuilder::new("https://xray.us-east-1.amazonaws.com").unwrap();
        assert_eq!(
            "https://xray.us-east-1.amazonaws.com/TraceSegments",
            builder.uri.to_string()
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(
            XRayRequestBuilder::new("not a url"),
            Err(XRayRequestError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn builds_put_trace_segments_request() {
        let builder = XRayRequestBuilder::new("http://127.0.0.1:2000").unwrap();
        let segment = json!({"id": "0202020202020202", "name": "foo"});

        let req = builder.build(vec![segment.clone()]).unwrap();

        assert_eq!(Method::POST, req.method());
        assert_eq!(
            req.headers()["X-Amz-Target"],
            "XRay_20160712.PutTraceSegments"
        );
        assert_eq!(req.headers()[CONTENT_TYPE], "application/x-amz-json-1.1");

        let body = req.into_body().collect().await.unwrap().to_bytes();
        let decoded: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json!({"TraceSegmentDocuments": [segment.to_string()]}),
            decoded
        );
    }
}
