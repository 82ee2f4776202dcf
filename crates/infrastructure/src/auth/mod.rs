//! Identity provider adapters.

mod keycloak_token_endpoint;

pub use keycloak_token_endpoint::KeycloakTokenEndpoint;
