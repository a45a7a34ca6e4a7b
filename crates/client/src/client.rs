//! The SSO API client facade.

use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};
use sso_client_auth::{
    AuthStrategy, Authentication, HttpBasicAuth, HttpBearerAuth, InterceptorPipeline,
    OutgoingRequest,
};
use sso_client_core::{DomainValue, Primitive, TypeRef, TypeRegistry, WireValue};
use sso_client_marshal::ObjectSerializer;
use sso_client_models::Endpoint;

use crate::config::ClientConfig;

const JSON: &str = "application/json";

/// Authentication configured on a client.
///
/// `basic_auth` is the SSO API's own security scheme and only applies once both
/// username and password are set; `default` applies to every request.
#[derive(Debug, Clone, Default)]
pub struct Authentications {
    pub default: AuthStrategy,
    pub basic_auth: HttpBasicAuth,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    serializer: ObjectSerializer,
    authentications: Authentications,
    interceptors: InterceptorPipeline,
}

impl ApiClient {
    /// Client over `registry`; credentials present in `config` are installed.
    pub fn new(config: ClientConfig, registry: Arc<TypeRegistry>) -> Self {
        let mut authentications = Authentications::default();
        if let Some(creds) = &config.client_credentials {
            authentications.basic_auth = HttpBasicAuth::new(&creds.username, &creds.password);
        }
        if let Some(token) = &config.bearer_token {
            authentications.default = HttpBearerAuth::new(token.as_str()).into();
        }

        Self {
            config,
            serializer: ObjectSerializer::new(registry),
            authentications,
            interceptors: InterceptorPipeline::new(),
        }
    }

    /// Client backed by the registry `config` selects.
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let registry = config.load_registry()?;
        Ok(Self::new(config, registry))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn serializer(&self) -> &ObjectSerializer {
        &self.serializer
    }

    pub fn authentications(&self) -> &Authentications {
        &self.authentications
    }

    pub fn set_default_authentication(&mut self, auth: impl Into<AuthStrategy>) {
        self.authentications.default = auth.into();
    }

    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.authentications.basic_auth = HttpBasicAuth::new(username, password);
    }

    pub fn add_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(&mut OutgoingRequest) + Send + Sync + 'static,
    {
        self.interceptors.push(interceptor);
    }

    /// Build the request for `endpoint`, ready for the transport.
    ///
    /// The body is serialized as the endpoint's request model (or passed through
    /// untouched when the endpoint declares none). Authentication runs after the
    /// default headers are set, interceptors run last.
    pub fn prepare(&self, endpoint: &Endpoint, body: Option<&DomainValue>) -> OutgoingRequest {
        let uri = format!("{}{}", self.config.base_path, endpoint.path);
        let mut request = OutgoingRequest::new(endpoint.method.clone(), uri);

        for (name, value) in &self.config.default_headers {
            request.set_header(name, value);
        }
        request.set_header(ACCEPT.as_str(), JSON);

        if let Some(body) = body {
            let type_ref = endpoint
                .request_type()
                .unwrap_or(TypeRef::Primitive(Primitive::Any));
            request.body = Some(self.serializer.serialize(body, &type_ref));
            request.set_header(CONTENT_TYPE.as_str(), JSON);
        }

        self.authenticate(&mut request);

        tracing::debug!(
            endpoint = endpoint.name,
            method = %request.method,
            uri = %request.uri,
            "request prepared"
        );
        request
    }

    /// Run scheme authentication, the default strategy and the interceptors.
    pub fn authenticate(&self, request: &mut OutgoingRequest) {
        let auth = &self.authentications;
        if auth.basic_auth.is_configured() {
            auth.basic_auth.apply_to_request(request);
        }
        auth.default.apply_to_request(request);
        self.interceptors.apply(request);
    }

    /// Decode a response body as `endpoint`'s response type.
    pub fn decode(&self, endpoint: &Endpoint, body: &WireValue) -> DomainValue {
        match endpoint.response_type() {
            Some(type_ref) => self.serializer.deserialize(body, &type_ref),
            None => DomainValue::from_wire(body),
        }
    }

    pub fn decode_as(&self, body: &WireValue, type_name: &str) -> DomainValue {
        self.serializer.deserialize_as(body, type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sso_client_auth::BasicCredentials;
    use sso_client_core::DomainObject;

    fn client() -> ApiClient {
        ApiClient::from_config(ClientConfig::default()).unwrap()
    }

    fn endpoint(name: &str) -> &'static Endpoint {
        Endpoint::by_name(name).unwrap()
    }

    #[test]
    fn get_without_body_has_no_content_type() {
        let req = client().prepare(endpoint("ping"), None);
        assert_eq!(req.uri, "http://localhost:7042/ping");
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn body_is_serialized_with_the_request_model() {
        let body: DomainValue = DomainObject::new("RequestUserRead")
            .with("id", vec!["u1", "u2"])
            .into();
        let req = client().prepare(endpoint("user_read"), Some(&body));

        assert_eq!(req.body, Some(json!({ "id": ["u1", "u2"] })));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn unconfigured_basic_auth_is_skipped() {
        let mut client = client();
        client.set_basic_auth("client-id", "");
        let req = client.prepare(endpoint("client_read"), None);
        assert!(req.auth.is_none());

        client.set_basic_auth("client-id", "client-secret");
        let req = client.prepare(endpoint("client_read"), None);
        assert_eq!(req.auth.map(|c| c.username), Some("client-id".to_string()));
    }

    #[test]
    fn default_strategy_then_interceptors() {
        let mut client = client();
        client.set_default_authentication(HttpBearerAuth::new("t0"));
        client.add_interceptor(|req| {
            let seen = req.header("authorization").unwrap_or("none").to_string();
            req.set_header("x-seen-auth", &seen);
        });

        let req = client.prepare(endpoint("ping"), None);
        assert_eq!(req.header("x-seen-auth"), Some("Bearer t0"));
    }

    #[test]
    fn configured_credentials_are_applied() {
        let config = ClientConfig {
            client_credentials: Some(BasicCredentials {
                username: "client-1".into(),
                password: "secret".into(),
            }),
            bearer_token: Some("tok".into()),
            ..ClientConfig::default()
        };
        let client = ApiClient::from_config(config).unwrap();
        let req = client.prepare(endpoint("client_read"), None);

        assert_eq!(req.auth.clone().map(|c| c.username), Some("client-1".to_string()));
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn decode_uses_the_endpoint_response_type() {
        let wire = json!({ "client_id": "c1", "created_at": "2024-01-02T03:04:05Z", "token": "t" });
        let decoded = client().decode(endpoint("csrf_create"), &wire);

        let csrf = decoded.as_object().unwrap();
        assert_eq!(csrf.type_name(), "ResponseCsrf");
        assert_eq!(csrf.get("clientId").and_then(DomainValue::as_str), Some("c1"));
        assert!(csrf.get("createdAt").and_then(DomainValue::as_date).is_some_and(|d| d.is_valid()));
    }

    #[test]
    fn decode_without_response_type_is_passthrough() {
        let wire = json!({ "ok": true });
        let decoded = client().decode(endpoint("user_delete"), &wire);
        assert_eq!(decoded.to_wire(), wire);
    }
}
