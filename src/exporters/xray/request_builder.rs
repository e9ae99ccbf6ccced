// SPDX-License-Identifier: Apache-2.0

use crate::exporters::xray::Region;
use crate::exporters::xray::transformer::Transformer;
use crate::exporters::xray::xray_request::{XRayRequestBuilder, XRayRequestError};
use bytes::Bytes;
use http::Request;
use http_body_util::Full;
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;

/// Turns a batch of resource spans into ready-to-send PutTraceSegments requests
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    transformer: Transformer,
    api_req_builder: XRayRequestBuilder,
}

impl RequestBuilder {
    pub fn new(
        transformer: Transformer,
        region: Region,
        custom_endpoint: Option<String>,
    ) -> Result<Self, XRayRequestError> {
        let endpoint = custom_endpoint.unwrap_or_else(|| region.endpoint());
        let api_req_builder = XRayRequestBuilder::new(&endpoint)?;
        Ok(Self {
            transformer,
            api_req_builder,
        })
    }

    pub fn build(
        &self,
        input: Vec<ResourceSpans>,
    ) -> Result<Vec<Request<Full<Bytes>>>, XRayRequestError> {
        self.transformer
            .transform(input)?
            .into_iter()
            .map(|chunk| self.api_req_builder.build(chunk))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::otlp::FakeOTLP;

    #[test]
    fn defaults_to_regional_endpoint() {
        let builder =
            RequestBuilder::new(Transformer::new("test".to_string()), Region::UsWest2, None)
                .unwrap();
        let reqs = builder
            .build(FakeOTLP::trace_service_request().resource_spans)
            .unwrap();

        assert_eq!(1, reqs.len());
        assert_eq!(
            "https://xray.us-west-2.amazonaws.com/TraceSegments",
            reqs[0].uri().to_string()
        );
    }

    #[test]
    fn one_request_per_segment_chunk() {
        let builder = RequestBuilder::new(
            Transformer::new("test".to_string()),
            Region::UsEast1,
            Some("http://localhost:2000".to_string()),
        )
        .unwrap();

        // 2 resources x 60 spans, chunked at 50 segments
        let reqs = builder
            .build(FakeOTLP::trace_service_request_with_spans(2, 60).resource_spans)
            .unwrap();
        assert_eq!(3, reqs.len());
        assert_eq!("localhost", reqs[0].uri().host().unwrap());
    }

    #[test]
    fn empty_batch_builds_no_requests() {
        let builder =
            RequestBuilder::new(Transformer::new("test".to_string()), Region::UsEast1, None)
                .unwrap();
        assert!(builder.build(vec![]).unwrap().is_empty());
    }
}
