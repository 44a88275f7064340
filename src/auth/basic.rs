use base64::Engine;

/// Username and password decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode `Basic base64(username:password)`.
///
/// The scheme name is matched case-insensitively and the credentials are
/// split on the first `:`, so passwords may contain colons. Returns `None`
/// for other schemes or undecodable payloads.
pub fn parse_basic_header(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())?;

    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(raw)
    }

    #[test]
    fn parses_username_and_password() {
        let header = format!("Basic {}", encode("admin:admin1"));
        let creds = parse_basic_header(&header).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "admin1");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let header = format!("basic {}", encode("admin:admin1"));
        assert!(parse_basic_header(&header).is_some());
    }

    #[test]
    fn password_keeps_extra_colons() {
        let header = format!("Basic {}", encode("ops:a:b:c"));
        let creds = parse_basic_header(&header).unwrap();
        assert_eq!(creds.username, "ops");
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn empty_password_is_allowed() {
        let header = format!("Basic {}", encode("admin:"));
        let creds = parse_basic_header(&header).unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(parse_basic_header("Bearer abc").is_none());
        assert!(parse_basic_header("Basic !!!not-base64!!!").is_none());
        assert!(parse_basic_header(&format!("Basic {}", encode("nocolon"))).is_none());
        assert!(parse_basic_header("").is_none());
    }
}
