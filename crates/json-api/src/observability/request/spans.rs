//! Route names for spans and metric labels.

use uuid::Uuid;

/// Collapse UUID path segments to `{uuid}` so each route is one label value.
pub(super) fn normalise_route(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
