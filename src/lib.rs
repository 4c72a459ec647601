// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB and outbound-email adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases and access policy
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
