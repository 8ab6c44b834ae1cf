//! Initialization directives.
//!
//! A directive is one unit of runtime configuration produced by
//! composition. The server runtime applies the sequence before accepting
//! connections; this crate only builds it.

use std::fmt;

use crate::config::ServiceIdentity;
use crate::dynconfig::ConfigSubscription;
use crate::observability::ServerTracer;
use crate::registry::RegistryClient;

/// One initialization directive for the server runtime.
#[derive(Debug)]
pub enum Directive {
    /// Announce the service identity. Always present, always first.
    Identity(ServiceIdentity),

    /// Register this instance with the service registry.
    Registry(RegistryClient),

    /// Subscribe to dynamic configuration, keyed by the service name.
    DynamicConfig(ConfigSubscription),

    /// Expose the metrics endpoint for the fleet's collectors.
    Tracer(ServerTracer),
}

impl Directive {
    /// Payload-free tag, for logs and ordering assertions.
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Identity(_) => DirectiveKind::Identity,
            Directive::Registry(_) => DirectiveKind::Registry,
            Directive::DynamicConfig(_) => DirectiveKind::DynamicConfig,
            Directive::Tracer(_) => DirectiveKind::Tracer,
        }
    }
}

/// The four directive kinds, in document-declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Identity,
    Registry,
    DynamicConfig,
    Tracer,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveKind::Identity => "identity",
            DirectiveKind::Registry => "registry",
            DirectiveKind::DynamicConfig => "dynamic-config",
            DirectiveKind::Tracer => "tracer",
        };
        f.write_str(name)
    }
}
