//! SSO API endpoint catalogue.

use http::Method;
use sso_client_core::TypeRef;

use crate::types::SsoType;
use crate::types::SsoType as T;

/// One SSO API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    /// Model carried in the JSON request body, if any.
    pub request: Option<SsoType>,
    /// Type name of the response body; `None` when the body is ignored.
    pub response: Option<&'static str>,
}

impl Endpoint {
    const fn get(name: &'static str, path: &'static str, response: &'static str) -> Self {
        Self {
            name,
            method: Method::GET,
            path,
            request: None,
            response: Some(response),
        }
    }

    const fn post(
        name: &'static str,
        path: &'static str,
        request: Option<SsoType>,
        response: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            method: Method::POST,
            path,
            request,
            response,
        }
    }

    pub fn all() -> &'static [Endpoint] {
        CATALOGUE
    }

    pub fn by_name(name: &str) -> Option<&'static Endpoint> {
        CATALOGUE.iter().find(|e| e.name == name)
    }

    pub fn request_type(&self) -> Option<TypeRef> {
        self.request.map(|t| TypeRef::named(t.name()))
    }

    pub fn response_type(&self) -> Option<TypeRef> {
        self.response.map(TypeRef::parse)
    }
}

static CATALOGUE: &[Endpoint] = &[
    Endpoint::get("ping", "/ping", "string"),
    Endpoint::get(
        "openid_configuration",
        "/.well-known/openid-configuration",
        "ResponseOpenidConfiguration",
    ),
    Endpoint::post("csrf_create", "/v2/csrf/create", None, Some("ResponseCsrf")),
    Endpoint::post("csrf_verify", "/v2/csrf/verify", Some(T::RequestCsrf), None),
    Endpoint::post("client_read", "/v2/client/read", None, Some("ResponseClient")),
    Endpoint::post(
        "client_access_read",
        "/v2/client/access/read",
        None,
        Some("ResponseAccessMany"),
    ),
    Endpoint::post(
        "client_access_update",
        "/v2/client/access/update",
        Some(T::RequestAccessUpdate),
        Some("ResponseAccess"),
    ),
    Endpoint::post(
        "client_access_delete",
        "/v2/client/access/delete",
        Some(T::RequestAccessDelete),
        None,
    ),
    Endpoint::post(
        "user_create",
        "/v2/user/create",
        Some(T::RequestUserCreate),
        Some("ResponseUser"),
    ),
    Endpoint::post(
        "user_read",
        "/v2/user/read",
        Some(T::RequestUserRead),
        Some("ResponseUserMany"),
    ),
    Endpoint::post(
        "user_update",
        "/v2/user/update",
        Some(T::RequestUserUpdate),
        Some("ResponseUser"),
    ),
    Endpoint::post("user_delete", "/v2/user/delete", Some(T::RequestUserDelete), None),
    Endpoint::post(
        "user_access_read",
        "/v2/user/access/read",
        Some(T::RequestUserAccessRead),
        Some("ResponseAccess"),
    ),
    Endpoint::post(
        "user_access_update",
        "/v2/user/access/update",
        Some(T::RequestAccessUpdate),
        Some("ResponseAccess"),
    ),
    Endpoint::post(
        "user_access_delete",
        "/v2/user/access/delete",
        Some(T::RequestAccessDelete),
        None,
    ),
    Endpoint::post(
        "api_key_create",
        "/v2/user/api-key/create",
        Some(T::RequestApiKeyCreate),
        Some("ResponseApiKey"),
    ),
    Endpoint::post(
        "api_key_read",
        "/v2/user/api-key/read",
        Some(T::RequestApiKeyRead),
        Some("ResponseApiKeyMany"),
    ),
    Endpoint::post(
        "api_key_update",
        "/v2/user/api-key/update",
        Some(T::RequestApiKeyUpdate),
        Some("ResponseApiKey"),
    ),
    Endpoint::post(
        "api_key_delete",
        "/v2/user/api-key/delete",
        Some(T::RequestApiKeyDelete),
        None,
    ),
    Endpoint::post(
        "api_key_verify",
        "/v2/user/api-key/verify",
        Some(T::RequestApiKeyVerify),
        Some("ResponseApiKey"),
    ),
    Endpoint::post(
        "audit_create",
        "/v2/audit/create",
        Some(T::RequestAuditCreate),
        Some("ResponseAudit"),
    ),
    Endpoint::post(
        "audit_read",
        "/v2/audit/read",
        Some(T::RequestAuditRead),
        Some("ResponseAuditMany"),
    ),
    Endpoint::post(
        "oauth2_token",
        "/v2/oauth2/token",
        Some(T::RequestOauth2Token),
        Some("any"),
    ),
    Endpoint::post(
        "oauth2_introspect",
        "/v2/oauth2/introspect",
        Some(T::RequestOauth2Introspect),
        Some("any"),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sso_registry;
    use sso_client_core::TypeKind;
    use std::collections::HashSet;

    #[test]
    fn every_endpoint_type_resolves_in_the_sso_registry() {
        let registry = sso_registry().unwrap();
        for endpoint in Endpoint::all() {
            for type_ref in endpoint.request_type().into_iter().chain(endpoint.response_type()) {
                assert!(
                    !matches!(registry.classify(&type_ref), TypeKind::Unknown),
                    "{} references unknown type {type_ref}",
                    endpoint.name
                );
            }
        }
    }

    #[test]
    fn names_and_paths_are_unique() {
        let names: HashSet<_> = Endpoint::all().iter().map(|e| e.name).collect();
        let paths: HashSet<_> = Endpoint::all().iter().map(|e| e.path).collect();
        assert_eq!(names.len(), Endpoint::all().len());
        assert_eq!(paths.len(), Endpoint::all().len());
    }

    #[test]
    fn only_discovery_endpoints_are_get() {
        let gets: Vec<_> = Endpoint::all()
            .iter()
            .filter(|e| e.method == Method::GET)
            .map(|e| e.path)
            .collect();
        assert_eq!(gets, ["/ping", "/.well-known/openid-configuration"]);
    }

    #[test]
    fn lookup_by_name() {
        let endpoint = Endpoint::by_name("user_create").unwrap();
        assert_eq!(endpoint.path, "/v2/user/create");
        assert_eq!(endpoint.request, Some(SsoType::RequestUserCreate));
        assert!(Endpoint::by_name("user_explode").is_none());
    }
}
