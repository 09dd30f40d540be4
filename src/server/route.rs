//! Route matching for the `POST /<service_path>/<rpc_name>[/]` grammar
//! (`spec.md` §4.5 step 2, §6).

/// Outcome of matching a request path against a configured service path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// Path matched the service prefix and named a syntactically valid RPC.
    Rpc(&'a str),
    /// Path matched the service prefix but the trailing segment is not a
    /// valid Thrift identifier.
    MalformedRpcName,
    /// Path does not start with the configured service prefix at all.
    NoMatch,
}

/// Match `path` against `/<service_path>/<rpc_name>[/]`.
///
/// `service_path` must not have leading/trailing slashes (it is the
/// canonical dotted-lowercase service name, e.g.
/// `thtp.test.calculator_service`).
#[must_use]
pub fn match_route<'a>(path: &'a str, service_path: &str) -> RouteMatch<'a> {
    let Some(rest) = path.strip_prefix('/') else {
        return RouteMatch::NoMatch;
    };
    let Some(rest) = rest.strip_prefix(service_path) else {
        return RouteMatch::NoMatch;
    };
    let Some(rpc_name) = rest.strip_prefix('/') else {
        return RouteMatch::NoMatch;
    };
    let rpc_name = rpc_name.strip_suffix('/').unwrap_or(rpc_name);
    if rpc_name.is_empty() || !is_thrift_identifier(rpc_name) {
        return RouteMatch::MalformedRpcName;
    }
    RouteMatch::Rpc(rpc_name)
}

/// Whether `s` matches the Thrift identifier grammar
/// `[A-Za-z_][A-Za-z0-9_.]*`.
#[must_use]
pub fn is_thrift_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
