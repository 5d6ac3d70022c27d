use thiserror::Error;

const MAX_DOMAIN_LEN: usize = 253;

/// Errors raised while cleaning user-supplied domain input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain is empty")]
    Empty,

    #[error("domain is longer than 253 characters")]
    TooLong,

    #[error("domain contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Normalize raw input (URL, e-mail address, bare host) into a lowercase host name
///
/// `https://www.Acme-Tech.com/careers?x=1` becomes `acme-tech.com`.
pub fn clean_domain(raw: &str) -> Result<String, DomainError> {
    let lowered = raw.trim().to_lowercase();

    let mut host = lowered.as_str();
    if let Some((_, after_at)) = host.rsplit_once('@') {
        host = after_at;
    }
    for scheme in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest;
            break;
        }
    }
    if let Some(end) = host.find(['/', '?', '#', ':']) {
        host = &host[..end];
    }
    host = host.strip_prefix("www.").unwrap_or(host);
    host = host.trim_end_matches('.');

    if host.is_empty() {
        return Err(DomainError::Empty);
    }
    if host.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::TooLong);
    }
    if let Some(bad) = host
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-'))
    {
        return Err(DomainError::InvalidCharacter(bad));
    }

    Ok(host.to_string())
}

/// Turn `acme-tech.com` into `Acme Tech`
pub fn display_name(domain: &str) -> String {
    let first_label = domain.split('.').next().unwrap_or(domain);

    first_label
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alphanumeric words of a domain or free text
pub fn labels(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url() {
        assert_eq!(
            clean_domain("  https://www.Acme-Tech.com/careers?x=1 ").unwrap(),
            "acme-tech.com"
        );
        assert_eq!(clean_domain("http://example.org:8080").unwrap(), "example.org");
        assert_eq!(clean_domain("example.org.").unwrap(), "example.org");
    }

    #[test]
    fn test_clean_email() {
        assert_eq!(clean_domain("jane.doe@Globex.io").unwrap(), "globex.io");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(clean_domain("   "), Err(DomainError::Empty));
        assert_eq!(clean_domain("https://"), Err(DomainError::Empty));
        assert_eq!(clean_domain("acme corp"), Err(DomainError::InvalidCharacter(' ')));
        assert_eq!(clean_domain(&"a".repeat(300)), Err(DomainError::TooLong));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("acme-tech.com"), "Acme Tech");
        assert_eq!(display_name("globex.io"), "Globex");
    }

    #[test]
    fn test_labels() {
        let parts: Vec<&str> = labels("open-ai.example.com").collect();
        assert_eq!(parts, vec!["open", "ai", "example", "com"]);
    }
}
