use std::path::PathBuf;

use proptest::prelude::*;
use serde_json::json;
use sso_client::{ApiClient, ClientConfig};
use sso_client_auth::{ApiKeyAuth, ApiKeyLocation, HttpBearerAuth};
use sso_client_core::{DomainObject, DomainValue};
use sso_client_models::Endpoint;

fn sso_client() -> ApiClient {
    let config = ClientConfig::new("https://sso.example.com/")
        .unwrap()
        .with_default_header("User-Agent", "sso-client-tests");
    ApiClient::from_config(config).unwrap()
}

fn endpoint(name: &str) -> &'static Endpoint {
    Endpoint::by_name(name).unwrap()
}

struct ManifestFile(PathBuf);

impl ManifestFile {
    fn write(name: &str, contents: &serde_json::Value) -> Self {
        let path = std::env::temp_dir().join(format!("{name}-{}.json", std::process::id()));
        std::fs::write(&path, contents.to_string()).unwrap();
        Self(path)
    }
}

impl Drop for ManifestFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn user_create_request_end_to_end() {
    let mut client = sso_client();
    client.set_basic_auth("client-id", "client-secret");
    client.set_default_authentication(HttpBearerAuth::new("user-token"));
    client.add_interceptor(|req| {
        req.set_header("x-request-id", "req-1");
    });

    let body: DomainValue = DomainObject::new("RequestUserCreate")
        .with("email", "ada@example.com")
        .with("enable", true)
        .with("locale", "en")
        .with("name", "Ada")
        .with("scope", "")
        .with("timezone", "Etc/UTC")
        .with(
            "password",
            DomainObject::new("RequestUserCreatePassword")
                .with("allowReset", true)
                .with("password", "correct horse")
                .with("requireUpdate", false),
        )
        .into();

    let req = client.prepare(endpoint("user_create"), Some(&body));

    assert_eq!(req.method, http::Method::POST);
    assert_eq!(req.uri, "https://sso.example.com/v2/user/create");
    assert_eq!(req.header("user-agent"), Some("sso-client-tests"));
    assert_eq!(req.header("authorization"), Some("Bearer user-token"));
    assert_eq!(req.header("x-request-id"), Some("req-1"));
    assert_eq!(req.auth.as_ref().map(|c| c.password.as_str()), Some("client-secret"));
    assert_eq!(
        req.body,
        Some(json!({
            "email": "ada@example.com",
            "enable": true,
            "locale": "en",
            "name": "Ada",
            "scope": "",
            "timezone": "Etc/UTC",
            "password": {
                "allow_reset": true,
                "password": "correct horse",
                "require_update": false
            }
        }))
    );
}

#[test]
fn user_read_response_decodes_nested_models_and_dates() {
    let wire = json!({
        "data": [{
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "enable": true,
            "static": false,
            "locale": "en",
            "timezone": "Etc/UTC",
            "created_at": "2024-05-06T07:08:09.123Z",
            "updated_at": "not a date",
            "oauth2_provider": [{
                "oauth2_provider": "github",
                "sub": "1234",
                "static": false,
                "user_id": "u1",
                "created_at": "2024-05-06T07:08:09.000Z"
            }],
            "oauth2_provider_count": 1
        }]
    });

    let client = sso_client();
    let decoded = client.decode(endpoint("user_read"), &wire);
    let page = decoded.as_object().unwrap();
    assert_eq!(page.type_name(), "ResponseUserMany");

    let users = page.get("data").and_then(DomainValue::as_array).unwrap();
    let user = users[0].as_object().unwrap();
    assert_eq!(user.type_name(), "ResponseUserManyData");
    assert_eq!(user.get("oauth2ProviderCount").and_then(DomainValue::as_i64), Some(1));
    assert!(user.get("createdAt").and_then(DomainValue::as_date).is_some_and(|d| d.is_valid()));
    assert!(user.get("updatedAt").and_then(DomainValue::as_date).is_some_and(|d| !d.is_valid()));
    assert!(user.get("access").is_none());

    let provider = user
        .get("oauth2Provider")
        .and_then(DomainValue::as_array)
        .and_then(|items| items[0].as_object())
        .unwrap();
    assert_eq!(provider.type_name(), "ResponseUserOauth2Provider");
    assert_eq!(provider.get("userId").and_then(DomainValue::as_str), Some("u1"));

    // Re-encoding reproduces the wire form; the malformed date survives as-is.
    assert_eq!(client.serializer().serialize_as(&decoded, "ResponseUserMany"), wire);
}

#[test]
fn api_key_cookie_joins_existing_cookie_header() {
    let mut client = sso_client();
    client.set_default_authentication(
        ApiKeyAuth::new(ApiKeyLocation::Cookie, "sso_key").with_api_key("k=1 2"),
    );
    client.add_interceptor(|req| {
        // Runs after authentication, so it sees the cookie the strategy wrote.
        let cookie = req.header("cookie").unwrap_or_default().to_string();
        req.set_header("x-cookie-echo", &cookie);
    });

    let req = client.prepare(endpoint("ping"), None);
    assert_eq!(req.header("cookie"), Some("sso_key=k%3D1%202"));
    assert_eq!(req.header("x-cookie-echo"), Some("sso_key=k%3D1%202"));

    let mut with_session = sso_client();
    with_session.set_default_authentication(
        ApiKeyAuth::new(ApiKeyLocation::Cookie, "sso_key").with_api_key("v"),
    );
    let mut req = with_session.prepare(endpoint("ping"), None);
    req.set_header("cookie", "session=abc");
    with_session.authenticate(&mut req);
    assert_eq!(req.header("cookie"), Some("session=abc; sso_key=v"));
}

#[test]
fn external_manifest_enables_discriminator_polymorphism() {
    let manifest = ManifestFile::write(
        "sso-client-polymorphic-manifest",
        &json!({
            "types": [
                {
                    "name": "Credential",
                    "discriminator": "kind",
                    "attributes": [
                        { "wireName": "kind", "domainName": "kind", "type": "string" },
                        { "wireName": "created_at", "domainName": "createdAt", "type": "Date" }
                    ]
                },
                {
                    "name": "PasswordCredential",
                    "discriminator": "kind",
                    "attributes": [
                        { "wireName": "kind", "domainName": "kind", "type": "string" },
                        { "wireName": "created_at", "domainName": "createdAt", "type": "Date" },
                        { "wireName": "require_update", "domainName": "requireUpdate", "type": "boolean" }
                    ]
                }
            ]
        }),
    );

    let config = ClientConfig::default().with_manifest(&manifest.0);
    let client = ApiClient::from_config(config).unwrap();

    let wire = json!({
        "kind": "PasswordCredential",
        "created_at": "2024-01-01T00:00:00.000Z",
        "require_update": true
    });
    let decoded = client.decode_as(&wire, "Credential");
    let credential = decoded.as_object().unwrap();
    assert_eq!(credential.type_name(), "PasswordCredential");
    assert_eq!(credential.get("requireUpdate").and_then(DomainValue::as_bool), Some(true));

    let unknown = json!({ "kind": "HardwareKey", "created_at": "2024-01-01T00:00:00.000Z" });
    let decoded = client.decode_as(&unknown, "Credential");
    assert_eq!(decoded.as_object().unwrap().type_name(), "Credential");
}

#[test]
fn invalid_manifest_fails_client_construction() {
    let manifest = ManifestFile::write(
        "sso-client-duplicate-manifest",
        &json!({ "types": [{ "name": "A", "attributes": [] }, { "name": "A", "attributes": [] }] }),
    );
    let err = ApiClient::from_config(ClientConfig::default().with_manifest(&manifest.0)).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate type 'A'"));
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    #[test]
    fn api_key_responses_round_trip(
        id in "[a-f0-9]{8}",
        name in ".{0,24}",
        scope in "[a-z:]{0,16}",
        enable in any::<bool>(),
        value in proptest::option::of("[A-Za-z0-9]{16}"),
    ) {
        let mut wire = json!({
            "client_id": "c1",
            "created_at": "2024-05-06T07:08:09.123Z",
            "updated_at": "2024-05-07T07:08:09.000Z",
            "enable": enable,
            "id": id,
            "name": name,
            "scope": scope,
            "user_id": "u1",
        });
        if let Some(value) = value {
            wire["value"] = json!(value);
        }

        let client = sso_client();
        let decoded = client.decode(endpoint("api_key_create"), &wire);
        prop_assert_eq!(decoded.as_object().map(|o| o.type_name()), Some("ResponseApiKey"));
        prop_assert_eq!(client.serializer().serialize_as(&decoded, "ResponseApiKey"), wire);
    }
}
