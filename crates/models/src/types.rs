//! Generated SSO model types.
//!
//! Every model the SSO API exchanges is a variant of [`SsoType`]; its fields live
//! in a static table (snake_case on the wire, camelCase in the domain). None of
//! these models is polymorphic, so no descriptor carries a discriminator.

use core::fmt;
use core::str::FromStr;

use sso_client_core::{RegistryResult, TypeDescriptor, TypeRegistry};
use thiserror::Error;

/// One attribute of a generated model.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    pub wire_name: &'static str,
    pub domain_name: &'static str,
    pub type_name: &'static str,
}

const fn field(wire_name: &'static str, domain_name: &'static str, type_name: &'static str) -> Field {
    Field {
        wire_name,
        domain_name,
        type_name,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SsoType {
    RequestAccessDelete,
    RequestAccessUpdate,
    RequestApiKeyCreate,
    RequestApiKeyDelete,
    RequestApiKeyRead,
    RequestApiKeyUpdate,
    RequestApiKeyVerify,
    RequestAuditCreate,
    RequestAuditRead,
    RequestAuditReadSeek,
    RequestCsrf,
    RequestOauth2Introspect,
    RequestOauth2Token,
    RequestUserAccessRead,
    RequestUserCreate,
    RequestUserCreatePassword,
    RequestUserDelete,
    RequestUserRead,
    RequestUserUpdate,
    RequestUserUpdateAccess,
    RequestUserUpdatePassword,
    ResponseAccess,
    ResponseAccessMany,
    ResponseAccessManyData,
    ResponseApiKey,
    ResponseApiKeyMany,
    ResponseApiKeyManyData,
    ResponseAudit,
    ResponseAuditMany,
    ResponseAuditManyData,
    ResponseClient,
    ResponseCsrf,
    ResponseOpenidConfiguration,
    ResponseUser,
    ResponseUserMany,
    ResponseUserManyData,
    ResponseUserOauth2Provider,
    ResponseUserPassword,
}

const ACCESS: &[Field] = &[
    field("client_id", "clientId", "string"),
    field("created_at", "createdAt", "Date"),
    field("enable", "enable", "boolean"),
    field("scope", "scope", "string"),
    field("static", "static", "boolean"),
    field("updated_at", "updatedAt", "Date"),
    field("user_id", "userId", "string"),
];

const API_KEY: &[Field] = &[
    field("client_id", "clientId", "string"),
    field("created_at", "createdAt", "Date"),
    field("enable", "enable", "boolean"),
    field("id", "id", "string"),
    field("name", "name", "string"),
    field("scope", "scope", "string"),
    field("updated_at", "updatedAt", "Date"),
    field("user_id", "userId", "string"),
    field("value", "value", "string"),
];

const AUDIT: &[Field] = &[
    field("api_key_id", "apiKeyId", "string"),
    field("audit_type", "auditType", "string"),
    field("client_id", "clientId", "string"),
    field("created_at", "createdAt", "Date"),
    field("data", "data", "any"),
    field("id", "id", "number"),
    field("status_code", "statusCode", "number"),
    field("subject", "subject", "string"),
    field("token_id", "tokenId", "string"),
    field("user_id", "userId", "string"),
];

const USER: &[Field] = &[
    field("access", "access", "ResponseAccess"),
    field("created_at", "createdAt", "Date"),
    field("email", "email", "string"),
    field("enable", "enable", "boolean"),
    field("id", "id", "string"),
    field("locale", "locale", "string"),
    field("name", "name", "string"),
    field("oauth2_provider", "oauth2Provider", "Array<ResponseUserOauth2Provider>"),
    field("oauth2_provider_count", "oauth2ProviderCount", "number"),
    field("password", "password", "ResponseUserPassword"),
    field("static", "static", "boolean"),
    field("timezone", "timezone", "string"),
    field("updated_at", "updatedAt", "Date"),
];

impl SsoType {
    pub const ALL: &'static [SsoType] = &[
        SsoType::RequestAccessDelete,
        SsoType::RequestAccessUpdate,
        SsoType::RequestApiKeyCreate,
        SsoType::RequestApiKeyDelete,
        SsoType::RequestApiKeyRead,
        SsoType::RequestApiKeyUpdate,
        SsoType::RequestApiKeyVerify,
        SsoType::RequestAuditCreate,
        SsoType::RequestAuditRead,
        SsoType::RequestAuditReadSeek,
        SsoType::RequestCsrf,
        SsoType::RequestOauth2Introspect,
        SsoType::RequestOauth2Token,
        SsoType::RequestUserAccessRead,
        SsoType::RequestUserCreate,
        SsoType::RequestUserCreatePassword,
        SsoType::RequestUserDelete,
        SsoType::RequestUserRead,
        SsoType::RequestUserUpdate,
        SsoType::RequestUserUpdateAccess,
        SsoType::RequestUserUpdatePassword,
        SsoType::ResponseAccess,
        SsoType::ResponseAccessMany,
        SsoType::ResponseAccessManyData,
        SsoType::ResponseApiKey,
        SsoType::ResponseApiKeyMany,
        SsoType::ResponseApiKeyManyData,
        SsoType::ResponseAudit,
        SsoType::ResponseAuditMany,
        SsoType::ResponseAuditManyData,
        SsoType::ResponseClient,
        SsoType::ResponseCsrf,
        SsoType::ResponseOpenidConfiguration,
        SsoType::ResponseUser,
        SsoType::ResponseUserMany,
        SsoType::ResponseUserManyData,
        SsoType::ResponseUserOauth2Provider,
        SsoType::ResponseUserPassword,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SsoType::RequestAccessDelete => "RequestAccessDelete",
            SsoType::RequestAccessUpdate => "RequestAccessUpdate",
            SsoType::RequestApiKeyCreate => "RequestApiKeyCreate",
            SsoType::RequestApiKeyDelete => "RequestApiKeyDelete",
            SsoType::RequestApiKeyRead => "RequestApiKeyRead",
            SsoType::RequestApiKeyUpdate => "RequestApiKeyUpdate",
            SsoType::RequestApiKeyVerify => "RequestApiKeyVerify",
            SsoType::RequestAuditCreate => "RequestAuditCreate",
            SsoType::RequestAuditRead => "RequestAuditRead",
            SsoType::RequestAuditReadSeek => "RequestAuditReadSeek",
            SsoType::RequestCsrf => "RequestCsrf",
            SsoType::RequestOauth2Introspect => "RequestOauth2Introspect",
            SsoType::RequestOauth2Token => "RequestOauth2Token",
            SsoType::RequestUserAccessRead => "RequestUserAccessRead",
            SsoType::RequestUserCreate => "RequestUserCreate",
            SsoType::RequestUserCreatePassword => "RequestUserCreatePassword",
            SsoType::RequestUserDelete => "RequestUserDelete",
            SsoType::RequestUserRead => "RequestUserRead",
            SsoType::RequestUserUpdate => "RequestUserUpdate",
            SsoType::RequestUserUpdateAccess => "RequestUserUpdateAccess",
            SsoType::RequestUserUpdatePassword => "RequestUserUpdatePassword",
            SsoType::ResponseAccess => "ResponseAccess",
            SsoType::ResponseAccessMany => "ResponseAccessMany",
            SsoType::ResponseAccessManyData => "ResponseAccessManyData",
            SsoType::ResponseApiKey => "ResponseApiKey",
            SsoType::ResponseApiKeyMany => "ResponseApiKeyMany",
            SsoType::ResponseApiKeyManyData => "ResponseApiKeyManyData",
            SsoType::ResponseAudit => "ResponseAudit",
            SsoType::ResponseAuditMany => "ResponseAuditMany",
            SsoType::ResponseAuditManyData => "ResponseAuditManyData",
            SsoType::ResponseClient => "ResponseClient",
            SsoType::ResponseCsrf => "ResponseCsrf",
            SsoType::ResponseOpenidConfiguration => "ResponseOpenidConfiguration",
            SsoType::ResponseUser => "ResponseUser",
            SsoType::ResponseUserMany => "ResponseUserMany",
            SsoType::ResponseUserManyData => "ResponseUserManyData",
            SsoType::ResponseUserOauth2Provider => "ResponseUserOauth2Provider",
            SsoType::ResponseUserPassword => "ResponseUserPassword",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            SsoType::RequestAccessDelete => const { &[field("user_id", "userId", "string")] },
            SsoType::RequestAccessUpdate => const { &[
                field("enable", "enable", "boolean"),
                field("scope", "scope", "string"),
                field("user_id", "userId", "string"),
            ] },
            SsoType::RequestApiKeyCreate => const { &[
                field("enable", "enable", "boolean"),
                field("name", "name", "string"),
                field("scope", "scope", "string"),
                field("user_id", "userId", "string"),
            ] },
            SsoType::RequestApiKeyDelete => const { &[field("id", "id", "string")] },
            SsoType::RequestApiKeyRead => const { &[
                field("id", "id", "Array<string>"),
                field("user_id", "userId", "Array<string>"),
            ] },
            SsoType::RequestApiKeyUpdate => const { &[
                field("enable", "enable", "boolean"),
                field("id", "id", "string"),
                field("name", "name", "string"),
            ] },
            SsoType::RequestApiKeyVerify => const { &[field("key", "key", "string")] },
            SsoType::RequestAuditCreate => const { &[
                field("api_key_id", "apiKeyId", "string"),
                field("audit_type", "auditType", "string"),
                field("data", "data", "any"),
                field("status_code", "statusCode", "number"),
                field("subject", "subject", "string"),
                field("token_id", "tokenId", "string"),
                field("user_id", "userId", "string"),
            ] },
            SsoType::RequestAuditRead => const { &[
                field("audit_type", "auditType", "Array<string>"),
                field("id", "id", "Array<number>"),
                field("seek", "seek", "RequestAuditReadSeek"),
                field("subject", "subject", "Array<string>"),
                field("user_id", "userId", "Array<string>"),
            ] },
            SsoType::RequestAuditReadSeek => const { &[
                field("id", "id", "number"),
                field("limit", "limit", "number"),
            ] },
            SsoType::RequestCsrf | SsoType::RequestOauth2Introspect => {
                const { &[field("token", "token", "string")] }
            }
            SsoType::RequestOauth2Token => const { &[
                field("code", "code", "string"),
                field("grant_type", "grantType", "string"),
                field("redirect_uri", "redirectUri", "string"),
                field("refresh_token", "refreshToken", "string"),
            ] },
            SsoType::RequestUserAccessRead => const { &[field("user_id", "userId", "string")] },
            SsoType::RequestUserCreate => const { &[
                field("email", "email", "string"),
                field("enable", "enable", "boolean"),
                field("locale", "locale", "string"),
                field("name", "name", "string"),
                field("password", "password", "RequestUserCreatePassword"),
                field("scope", "scope", "string"),
                field("timezone", "timezone", "string"),
            ] },
            SsoType::RequestUserCreatePassword => const { &[
                field("allow_reset", "allowReset", "boolean"),
                field("password", "password", "string"),
                field("require_update", "requireUpdate", "boolean"),
            ] },
            SsoType::RequestUserDelete => const { &[field("id", "id", "string")] },
            SsoType::RequestUserRead => const { &[
                field("email", "email", "Array<string>"),
                field("id", "id", "Array<string>"),
            ] },
            SsoType::RequestUserUpdate => const { &[
                field("access", "access", "RequestUserUpdateAccess"),
                field("email", "email", "string"),
                field("enable", "enable", "boolean"),
                field("id", "id", "string"),
                field("locale", "locale", "string"),
                field("name", "name", "string"),
                field("password", "password", "RequestUserUpdatePassword"),
                field("timezone", "timezone", "string"),
            ] },
            SsoType::RequestUserUpdateAccess => const { &[
                field("enable", "enable", "boolean"),
                field("scope", "scope", "string"),
            ] },
            SsoType::RequestUserUpdatePassword => const { &[
                field("allow_reset", "allowReset", "boolean"),
                field("require_update", "requireUpdate", "boolean"),
            ] },
            SsoType::ResponseAccess | SsoType::ResponseAccessManyData => ACCESS,
            SsoType::ResponseAccessMany => {
                const { &[field("data", "data", "Array<ResponseAccessManyData>")] }
            }
            SsoType::ResponseApiKey | SsoType::ResponseApiKeyManyData => API_KEY,
            SsoType::ResponseApiKeyMany => {
                const { &[field("data", "data", "Array<ResponseApiKeyManyData>")] }
            }
            SsoType::ResponseAudit | SsoType::ResponseAuditManyData => AUDIT,
            SsoType::ResponseAuditMany => {
                const { &[field("data", "data", "Array<ResponseAuditManyData>")] }
            }
            SsoType::ResponseClient => const { &[
                field("enable", "enable", "boolean"),
                field("id", "id", "string"),
                field("name", "name", "string"),
                field("redirect_uri", "redirectUri", "string"),
                field("register_enable", "registerEnable", "boolean"),
                field("register_scope", "registerScope", "string"),
                field("scope", "scope", "string"),
                field("uri", "uri", "string"),
                field("user_scope", "userScope", "string"),
            ] },
            SsoType::ResponseCsrf => const { &[
                field("client_id", "clientId", "string"),
                field("created_at", "createdAt", "Date"),
                field("token", "token", "string"),
                field("ttl", "ttl", "Date"),
            ] },
            SsoType::ResponseOpenidConfiguration => const { &[
                field("authorization_endpoint", "authorizationEndpoint", "string"),
                field("issuer", "issuer", "string"),
                field("token_endpoint", "tokenEndpoint", "string"),
                field(
                    "token_endpoint_auth_methods_supported",
                    "tokenEndpointAuthMethodsSupported",
                    "Array<string>",
                ),
            ] },
            SsoType::ResponseUser | SsoType::ResponseUserManyData => USER,
            SsoType::ResponseUserMany => {
                const { &[field("data", "data", "Array<ResponseUserManyData>")] }
            }
            SsoType::ResponseUserOauth2Provider => const { &[
                field("created_at", "createdAt", "Date"),
                field("oauth2_provider", "oauth2Provider", "string"),
                field("static", "static", "boolean"),
                field("sub", "sub", "string"),
                field("user_id", "userId", "string"),
            ] },
            SsoType::ResponseUserPassword => const { &[
                field("allow_reset", "allowReset", "boolean"),
                field("created_at", "createdAt", "Date"),
                field("require_update", "requireUpdate", "boolean"),
                field("static", "static", "boolean"),
                field("updated_at", "updatedAt", "Date"),
                field("user_id", "userId", "string"),
            ] },
        }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.fields()
            .iter()
            .fold(TypeDescriptor::new(self.name()), |descriptor, f| {
                descriptor.with_attribute(f.wire_name, f.domain_name, f.type_name)
            })
    }
}

impl fmt::Display for SsoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown SSO model type '{0}'")]
pub struct UnknownSsoType(pub String);

impl FromStr for SsoType {
    type Err = UnknownSsoType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SsoType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownSsoType(s.to_string()))
    }
}

/// Registry holding every [`SsoType`].
pub fn sso_registry() -> RegistryResult<TypeRegistry> {
    SsoType::ALL
        .iter()
        .fold(TypeRegistry::builder(), |builder, t| builder.model(t.descriptor()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_client_core::{TypeKind, TypeRef};

    fn innermost(type_ref: &TypeRef) -> &TypeRef {
        match type_ref {
            TypeRef::Array(inner) => innermost(inner),
            other => other,
        }
    }

    #[test]
    fn registry_contains_every_type() {
        let registry = sso_registry().unwrap();
        assert_eq!(registry.len(), SsoType::ALL.len());
        for t in SsoType::ALL {
            assert!(registry.contains(t.name()), "{t} missing");
        }
    }

    #[test]
    fn every_attribute_type_resolves() {
        let registry = sso_registry().unwrap();
        for t in SsoType::ALL {
            for f in t.fields() {
                let type_ref = TypeRef::parse(f.type_name);
                assert!(
                    !matches!(registry.classify(innermost(&type_ref)), TypeKind::Unknown),
                    "{t}.{} has unresolved type {}",
                    f.wire_name,
                    f.type_name
                );
            }
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for t in SsoType::ALL {
            assert_eq!(t.name().parse::<SsoType>(), Ok(*t));
        }
        assert!("ResponseWidget".parse::<SsoType>().is_err());
    }

    #[test]
    fn timestamps_are_dates() {
        let access = SsoType::ResponseAccess.descriptor();
        let created = access.attribute_by_wire_name("created_at").unwrap();
        assert_eq!(created.domain_name, "createdAt");
        assert_eq!(created.type_ref, TypeRef::Date);
    }
}
