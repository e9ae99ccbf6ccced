// SPDX-License-Identifier: Apache-2.0

//! Splits a trace batch so that each piece holds the spans of one trace.

use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans};
use std::collections::HashMap;

/// Group spans by (resource, scope, trace id).
///
/// Every group carries exactly one resource and one scope, copied from the
/// source batch. Groups come out in the order their first span was seen and
/// spans keep their source order. The same trace id under two scopes yields
/// two groups.
pub fn split_traces(batch: &[ResourceSpans]) -> Vec<Vec<ResourceSpans>> {
    let mut groups: Vec<ResourceSpans> = Vec::new();

    for rs in batch {
        for ss in &rs.scope_spans {
            let mut by_trace: HashMap<&[u8], usize> = HashMap::new();

            for span in &ss.spans {
                let idx = *by_trace.entry(span.trace_id.as_slice()).or_insert_with(|| {
                    groups.push(ResourceSpans {
                        resource: rs.resource.clone(),
                        scope_spans: vec![ScopeSpans {
                            scope: ss.scope.clone(),
                            spans: Vec::new(),
                            schema_url: ss.schema_url.clone(),
                        }],
                        schema_url: rs.schema_url.clone(),
                    });
                    groups.len() - 1
                });

                groups[idx].scope_spans[0].spans.push(span.clone());
            }
        }
    }

    groups.into_iter().map(|rs| vec![rs]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::otlp::FakeOTLP;

    fn trace_ids(group: &[ResourceSpans]) -> Vec<Vec<u8>> {
        group[0].scope_spans[0]
            .spans
            .iter()
            .map(|s| s.trace_id.clone())
            .collect()
    }

    #[test]
    fn groups_spans_by_trace_in_first_seen_order() {
        // trace ids cycle 1, 2, 3, 1, 2, 3, 1
        let rs = FakeOTLP::resource_spans_with_traces(3, 7);
        let splits = split_traces(&[rs.clone()]);

        assert_eq!(3, splits.len());
        assert_eq!(vec![FakeOTLP::trace_id(1); 3], trace_ids(&splits[0]));
        assert_eq!(vec![FakeOTLP::trace_id(2); 2], trace_ids(&splits[1]));
        assert_eq!(vec![FakeOTLP::trace_id(3); 2], trace_ids(&splits[2]));

        for split in &splits {
            assert_eq!(1, split.len());
            assert_eq!(1, split[0].scope_spans.len());
            assert_eq!(rs.resource, split[0].resource);
            assert_eq!(rs.scope_spans[0].scope, split[0].scope_spans[0].scope);
        }
    }

    #[test]
    fn same_trace_in_two_scopes_is_two_groups() {
        let mut rs = FakeOTLP::resource_spans_with_traces(1, 2);
        let mut second_scope = rs.scope_spans[0].clone();
        second_scope.scope.as_mut().unwrap().name = "other".to_string();
        rs.scope_spans.push(second_scope);

        let splits = split_traces(&[rs]);
        assert_eq!(2, splits.len());
        assert_eq!(
            "scope",
            splits[0][0].scope_spans[0].scope.as_ref().unwrap().name
        );
        assert_eq!(
            "other",
            splits[1][0].scope_spans[0].scope.as_ref().unwrap().name
        );
    }

    #[test]
    fn separate_resources_are_separate_groups() {
        let batch = FakeOTLP::trace_service_request_with_spans(2, 2).resource_spans;
        let splits = split_traces(&batch);
        assert_eq!(2, splits.len());
        assert_eq!(2, splits[0][0].scope_spans[0].spans.len());
    }

    #[test]
    fn empty_batch_has_no_groups() {
        assert!(split_traces(&[]).is_empty());
    }
}
