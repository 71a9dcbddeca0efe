//! Role-based access control.

use crate::auth::Claims;
use crate::error::AuthError;

/// Require at least one of `allowed` among the token's roles.
pub fn require_any_role(claims: &Claims, allowed: &[String]) -> Result<(), AuthError> {
    if allowed.iter().any(|role| claims.has_role(role)) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RealmAccess;

    fn claims(roles: &[&str]) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            exp: 0,
            realm_access: RealmAccess {
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        }
    }

    fn allowed() -> Vec<String> {
        vec!["admin".to_string(), "analyst".to_string()]
    }

    #[test]
    fn any_allowed_role_passes() {
        assert!(require_any_role(&claims(&["analyst"]), &allowed()).is_ok());
        assert!(require_any_role(&claims(&["viewer", "admin"]), &allowed()).is_ok());
    }

    #[test]
    fn missing_role_is_forbidden() {
        let result = require_any_role(&claims(&["viewer"]), &allowed());
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn no_roles_is_forbidden() {
        let result = require_any_role(&claims(&[]), &allowed());
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }
}
