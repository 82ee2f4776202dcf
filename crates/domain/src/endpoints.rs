//! Addressing for the identity provider and the article service.

use url::Url;

use crate::article::ArticleId;
use crate::error::{DomainError, DomainResult};

/// An OpenID Connect realm on a Keycloak-style identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProvider {
    token_endpoint: Url,
    realm: String,
    client_id: String,
}

impl IdentityProvider {
    /// Creates the provider address from its base URL, realm and client id.
    ///
    /// # Errors
    /// Returns an error if the URL is not an http(s) base URL or the realm
    /// or client id is empty.
    pub fn new(
        base_url: &str,
        realm: impl Into<String>,
        client_id: impl Into<String>,
    ) -> DomainResult<Self> {
        let realm = realm.into();
        let client_id = client_id.into();

        if realm.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier("realm is empty".to_string()));
        }
        if client_id.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "client id is empty".to_string(),
            ));
        }

        let mut token_endpoint = parse_base(base_url)?;
        token_endpoint
            .path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .extend(["realms", realm.as_str(), "protocol", "openid-connect", "token"]);

        Ok(Self {
            token_endpoint,
            realm,
            client_id,
        })
    }

    /// `{base}/realms/{realm}/protocol/openid-connect/token`
    #[must_use]
    pub const fn token_endpoint(&self) -> &Url {
        &self.token_endpoint
    }

    /// The realm name.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// The public client id sent with every grant.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// The article service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleService {
    root: Url,
}

impl ArticleService {
    /// Creates the service address from its base URL.
    ///
    /// # Errors
    /// Returns an error if the URL is not an http(s) base URL.
    pub fn new(base_url: &str) -> DomainResult<Self> {
        let mut root = parse_base(base_url)?;
        root.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "articles"]);
        Ok(Self { root })
    }

    /// `{base}/api/articles/titles`
    #[must_use]
    pub fn titles_url(&self) -> Url {
        self.child("titles")
    }

    /// `{base}/api/articles/{id}`
    #[must_use]
    pub fn article_url(&self, id: ArticleId) -> Url {
        self.child(&id.to_string())
    }

    fn child(&self, segment: &str) -> Url {
        let mut url = self.root.clone();
        // The root was checked to be a base URL at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(segment);
        }
        url
    }
}

fn parse_base(base_url: &str) -> DomainResult<Url> {
    let url =
        Url::parse(base_url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(DomainError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}
