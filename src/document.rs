//! # Configuration documents
//!
//! Decoding of `kind`-tagged YAML or JSON documents and dispatch to the
//! matching validation entry point.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{
    BackendTrafficPolicy, Gateway, GatewayClass, GrpcRoute, HttpRoute, ListenerSet, ObjectMeta,
    TcpRoute, UdpRoute,
};
use crate::errors::{GwValidateError, Result};
use crate::validation::{
    validate_backend_traffic_policy, validate_gateway, validate_gateway_class,
    validate_gateway_class_update, validate_grpc_route, validate_http_route, validate_listener_set,
    validate_tcp_route, validate_udp_route, ErrorList,
};

/// One configuration object, selected by its `kind` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConfigDocument {
    #[serde(rename = "HTTPRoute")]
    HttpRoute(HttpRoute),
    #[serde(rename = "GRPCRoute")]
    GrpcRoute(GrpcRoute),
    #[serde(rename = "TCPRoute")]
    TcpRoute(TcpRoute),
    #[serde(rename = "UDPRoute")]
    UdpRoute(UdpRoute),
    Gateway(Gateway),
    GatewayClass(GatewayClass),
    ListenerSet(ListenerSet),
    BackendTrafficPolicy(BackendTrafficPolicy),
}

impl ConfigDocument {
    /// The wire name of the document's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigDocument::HttpRoute(_) => "HTTPRoute",
            ConfigDocument::GrpcRoute(_) => "GRPCRoute",
            ConfigDocument::TcpRoute(_) => "TCPRoute",
            ConfigDocument::UdpRoute(_) => "UDPRoute",
            ConfigDocument::Gateway(_) => "Gateway",
            ConfigDocument::GatewayClass(_) => "GatewayClass",
            ConfigDocument::ListenerSet(_) => "ListenerSet",
            ConfigDocument::BackendTrafficPolicy(_) => "BackendTrafficPolicy",
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ConfigDocument::HttpRoute(doc) => &doc.metadata,
            ConfigDocument::GrpcRoute(doc) => &doc.metadata,
            ConfigDocument::TcpRoute(doc) => &doc.metadata,
            ConfigDocument::UdpRoute(doc) => &doc.metadata,
            ConfigDocument::Gateway(doc) => &doc.metadata,
            ConfigDocument::GatewayClass(doc) => &doc.metadata,
            ConfigDocument::ListenerSet(doc) => &doc.metadata,
            ConfigDocument::BackendTrafficPolicy(doc) => &doc.metadata,
        }
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            ConfigDocument::HttpRoute(doc) => &mut doc.metadata,
            ConfigDocument::GrpcRoute(doc) => &mut doc.metadata,
            ConfigDocument::TcpRoute(doc) => &mut doc.metadata,
            ConfigDocument::UdpRoute(doc) => &mut doc.metadata,
            ConfigDocument::Gateway(doc) => &mut doc.metadata,
            ConfigDocument::GatewayClass(doc) => &mut doc.metadata,
            ConfigDocument::ListenerSet(doc) => &mut doc.metadata,
            ConfigDocument::BackendTrafficPolicy(doc) => &mut doc.metadata,
        }
    }

    /// `Kind/name` label for log lines and reports.
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.kind(), self.metadata().name)
    }

    /// Set the namespace when the document does not carry one.
    pub fn apply_default_namespace(&mut self, namespace: &str) {
        let metadata = self.metadata_mut();
        if metadata.namespace.as_deref().map_or(true, str::is_empty) {
            metadata.namespace = Some(namespace.to_string());
        }
    }
}

/// Run the validation entry point matching the document's kind.
pub fn validate_document(document: &ConfigDocument) -> ErrorList {
    match document {
        ConfigDocument::HttpRoute(route) => validate_http_route(route),
        ConfigDocument::GrpcRoute(route) => validate_grpc_route(route),
        ConfigDocument::TcpRoute(route) => validate_tcp_route(route),
        ConfigDocument::UdpRoute(route) => validate_udp_route(route),
        ConfigDocument::Gateway(gateway) => validate_gateway(gateway),
        ConfigDocument::GatewayClass(class) => validate_gateway_class(class),
        ConfigDocument::ListenerSet(listener_set) => validate_listener_set(listener_set),
        ConfigDocument::BackendTrafficPolicy(policy) => validate_backend_traffic_policy(policy),
    }
}

/// Validate `new` as an update of `old`.
///
/// GatewayClass updates get the immutability check; every other kind is
/// validated as `new` on its own. Both documents must be of the same kind.
pub fn validate_document_update(old: &ConfigDocument, new: &ConfigDocument) -> Result<ErrorList> {
    match (old, new) {
        (ConfigDocument::GatewayClass(old), ConfigDocument::GatewayClass(new)) => {
            Ok(validate_gateway_class_update(Some(old), Some(new)))
        }
        _ if old.kind() == new.kind() => Ok(validate_document(new)),
        _ => Err(GwValidateError::validation(
            format!("cannot update a {} with a {}", old.kind(), new.kind()),
            1,
        )),
    }
}

/// Decode every document in `content`.
///
/// The input is read as a stream of YAML documents, which also covers JSON.
/// Empty documents are skipped and a document holding a sequence
/// contributes each of its items.
pub fn parse_documents(content: &str) -> Result<Vec<ConfigDocument>> {
    let mut documents = Vec::new();
    for (index, part) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let context = || format!("document {}", index);
        let value = serde_yaml::Value::deserialize(part)
            .map_err(|e| GwValidateError::from(e).with_context(context()))?;
        let items = match value {
            serde_yaml::Value::Null => continue,
            serde_yaml::Value::Sequence(items) => items,
            other => vec![other],
        };
        for item in items {
            let document: ConfigDocument = serde_yaml::from_value(item)
                .map_err(|e| GwValidateError::from(e).with_context(context()))?;
            debug!(index, document = %document.display_name(), "decoded document");
            documents.push(document);
        }
    }
    Ok(documents)
}

/// Read and decode every document in the file at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_documents(path: &Path) -> Result<Vec<ConfigDocument>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GwValidateError::io(e, format!("failed to read {}", path.display())))?;
    let documents = parse_documents(&content).map_err(|e| e.with_context(path.display().to_string()))?;
    debug!(count = documents.len(), "loaded documents");
    Ok(documents)
}
