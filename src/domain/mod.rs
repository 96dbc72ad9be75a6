//! Domain layer
//!
//! This module contains the configuration objects the validators inspect:
//! routes, gateways, listeners, gateway classes, listener sets and backend
//! traffic policies. They are plain serde types decoded from YAML or JSON
//! documents with camelCase field names, and carry no behaviour beyond small
//! accessors and constructors.
//!
//! ## Module Organization
//!
//! - `meta`: object metadata
//! - `references`: parent, backend, secret and policy target references
//! - `duration`: Gateway API duration strings
//! - `http_route`: HTTPRoute, its matches, filters and timeouts
//! - `grpc_route`: GRPCRoute
//! - `l4_route`: TCPRoute and UDPRoute
//! - `gateway`: Gateway, listeners, addresses, GatewayClass and ListenerSet
//! - `policy`: BackendTrafficPolicy

/// Define a string-backed enum with a closed set of known values and an
/// `Other` catch-all that keeps unknown input verbatim.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value outside the known set, preserved verbatim.
            Other(String),
        }

        impl $name {
            /// Wire names of every known value.
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod duration;
pub mod gateway;
pub mod grpc_route;
pub mod http_route;
pub mod l4_route;
pub mod meta;
pub mod policy;
pub mod references;

// Re-export main types from each module
pub use duration::{DurationError, GatewayDuration};
pub use gateway::{
    AddressType, Gateway, GatewayAddress, GatewayClass, GatewayClassSpec, GatewaySpec, Listener,
    ListenerSet, ListenerSetSpec, ListenerTlsConfig, ParentGatewayReference, ProtocolType,
    TlsModeType,
};
pub use grpc_route::{
    GrpcBackendRef, GrpcFilter, GrpcHeaderMatch, GrpcMethodMatch, GrpcMethodMatchType, GrpcRoute,
    GrpcRouteFilter, GrpcRouteFilterType, GrpcRouteMatch, GrpcRouteRule, GrpcRouteSpec,
};
pub use http_route::{
    HttpBackendRef, HttpFilter, HttpHeader, HttpHeaderFilter, HttpHeaderMatch, HttpPathMatch,
    HttpPathModifier, HttpQueryParamMatch, HttpRequestMirrorFilter, HttpRequestRedirectFilter,
    HttpRoute, HttpRouteFilter, HttpRouteFilterType, HttpRouteMatch, HttpRouteRule, HttpRouteSpec,
    HttpRouteTimeouts, HttpUrlRewriteFilter, PathMatchType, PathModifier, PathModifierType,
};
pub use l4_route::{L4RouteRule, L4RouteSpec, TcpRoute, UdpRoute};
pub use meta::ObjectMeta;
pub use policy::{
    BackendTrafficPolicy, BackendTrafficPolicySpec, BudgetDetails, CookieConfig,
    CookieLifetimeType, RequestRate, RetryConstraint, SessionPersistence, SessionPersistenceType,
};
pub use references::{
    BackendObjectReference, BackendRef, LocalObjectReference, LocalPolicyTargetReference,
    ParentReference, SecretObjectReference, DEFAULT_BACKEND_KIND, DEFAULT_PARENT_KIND,
    GATEWAY_GROUP,
};

#[cfg(test)]
mod tests {
    string_enum! {
        Colour {
            Red => "Red",
            DarkBlue => "Dark-Blue",
        }
    }

    #[test]
    fn string_enum_round_trips_unknown_values() {
        assert_eq!(Colour::from("Red"), Colour::Red);
        assert_eq!(Colour::from("Dark-Blue").as_str(), "Dark-Blue");
        assert_eq!(Colour::from("Green"), Colour::Other("Green".to_string()));
        assert!(!Colour::from("Green").is_known());
        assert_eq!(String::from(Colour::Other("Green".into())), "Green");
        assert_eq!(Colour::KNOWN, &["Red", "Dark-Blue"]);

        let decoded: Vec<Colour> = serde_json::from_str(r#"["Red", "teal"]"#).unwrap();
        assert_eq!(decoded, vec![Colour::Red, Colour::Other("teal".into())]);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), r#"["Red","teal"]"#);
    }
}
